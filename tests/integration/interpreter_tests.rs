//! Integration tests for the serial protocol: command line → interpreter →
//! display, relay and status-LED effects, all against mock ports.

use crate::mock_hw::{MockPanel, PanelCall, RecordingSink};

use arcadepanel::app::events::{AppEvent, RejectReason};
use arcadepanel::app::commands::{PlayerVerb, SessionVerb};
use arcadepanel::app::{CommandInterpreter, Readiness};
use arcadepanel::config::{PanelConfig, PlayerClampFloor, ReadyTransition};
use arcadepanel::display::{Bitmap, Screen};
use arcadepanel::drivers::status_led::{LedStatus, StatusCell};

fn make(config: PanelConfig) -> (CommandInterpreter, MockPanel, RecordingSink) {
    (
        CommandInterpreter::new(config, StatusCell::default()),
        MockPanel::new(),
        RecordingSink::new(),
    )
}

fn booted() -> (CommandInterpreter, MockPanel, RecordingSink) {
    let (mut it, mut hw, mut sink) = make(PanelConfig::default());
    it.boot(&mut hw, &mut sink);
    hw.clear_log();
    sink.events.clear();
    (it, hw, sink)
}

fn ready() -> (CommandInterpreter, MockPanel, RecordingSink) {
    let (mut it, mut hw, mut sink) = booted();
    let reply = it.handle_line("ESP32?", &mut hw, &mut sink);
    assert_eq!(reply.as_str(), "ESP32 ready");
    hw.clear_log();
    sink.events.clear();
    (it, hw, sink)
}

/// Every `present` must follow a `clear` issued since the previous present.
/// Returns the frames (as draw-call lists) that violate this.
fn frames_without_clear(hw: &MockPanel) -> Vec<Vec<PanelCall>> {
    let mut bad = Vec::new();
    let mut cleared = false;
    let mut current = Vec::new();
    for call in &hw.calls {
        match call {
            PanelCall::Clear => cleared = true,
            PanelCall::Present => {
                if !cleared {
                    bad.push(std::mem::take(&mut current));
                }
                current.clear();
                cleared = false;
            }
            other => current.push(other.clone()),
        }
    }
    bad
}

fn joystick_icons(frame: &[PanelCall]) -> [bool; 4] {
    let mut lit = [false; 4];
    for call in frame {
        if let PanelCall::Bitmap {
            bitmap: Bitmap::JoystickOn(slot),
            ..
        } = call
        {
            lit[*slot as usize] = true;
        }
    }
    lit
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_shows_splash_then_waits_with_relays_open() {
    let (mut it, mut hw, mut sink) = make(PanelConfig::default());
    it.boot(&mut hw, &mut sink);

    let frames = hw.frames();
    assert_eq!(frames.len(), 3, "splash, blank, waiting");
    assert!(frames[0].contains(&PanelCall::Bitmap {
        x: 29,
        y: 10,
        bitmap: Bitmap::Logo
    }));
    assert!(frames[1].is_empty(), "splash is followed by a blank frame");
    assert!(hw.drew(Bitmap::LinkConnecting));

    // Splash hold happens before the blank frame.
    let pause = hw.calls.iter().position(|c| *c == PanelCall::Pause(10_000));
    let disconnect = hw.calls.iter().position(|c| *c == PanelCall::DisconnectAll);
    assert!(pause.is_some() && disconnect.is_some());
    assert!(pause < disconnect);

    assert_eq!(it.readiness(), Readiness::AwaitingHandshake);
    assert_eq!(it.status(), LedStatus::Waiting);
    assert_eq!(hw.relays, [false; 4]);
    assert_eq!(sink.events.last(), Some(&AppEvent::Booted));
    assert!(frames_without_clear(&hw).is_empty());
}

// ── Handshake ─────────────────────────────────────────────────

#[test]
fn handshake_runs_four_progress_steps_in_order() {
    let (mut it, mut hw, mut sink) = booted();
    let reply = it.handle_line("ESP32?", &mut hw, &mut sink);

    assert_eq!(reply.as_str(), "ESP32 ready");
    assert_eq!(it.readiness(), Readiness::Ready);
    assert_eq!(it.status(), LedStatus::Ready);
    assert_eq!(it.connected(), [true; 4]);
    assert_eq!(hw.progress_values(), vec![25, 50, 75, 100]);

    // Each progress frame is presented, then exactly one new slot is
    // energised, then the step holds.
    let presents: Vec<usize> = hw
        .calls
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == PanelCall::Present)
        .map(|(i, _)| i)
        .collect();
    for slot in 0..4 {
        let energise = hw
            .calls
            .iter()
            .position(|c| *c == PanelCall::EnergizeSlot(slot))
            .expect("slot energised");
        assert!(presents[slot] < energise);
        assert_eq!(hw.calls[energise + 1], PanelCall::Pause(2_000));
        assert!(energise < presents[slot + 1]);
    }
    assert_eq!(hw.count(&PanelCall::EnergizeSlot(0)), 1);
    assert_eq!(hw.total_pause_ms(), 4 * 2_000);
    assert_eq!(hw.relays, [true; 4]);
}

#[test]
fn handshake_progress_bar_uses_fixed_geometry() {
    let (mut it, mut hw, mut sink) = booted();
    it.handle_line("ESP32?", &mut hw, &mut sink);
    assert!(hw.calls.contains(&PanelCall::ProgressBar {
        x: 5,
        y: 42,
        width: 116,
        height: 10,
        progress: 25
    }));
}

#[test]
fn handshake_ends_on_ready_screen_with_lit_stars() {
    let (mut it, mut hw, mut sink) = booted();
    it.handle_line("ESP32?", &mut hw, &mut sink);

    let frames = hw.frames();
    let last = frames.last().unwrap();
    assert!(last.contains(&PanelCall::Bitmap {
        x: 4,
        y: 38,
        bitmap: Bitmap::LinkConnected
    }));
    assert!(last.contains(&PanelCall::Bitmap {
        x: 6,
        y: 8,
        bitmap: Bitmap::StarWhite
    }));
    // Progress frames were drawn while configuring, stars dark.
    assert!(frames[0].contains(&PanelCall::Bitmap {
        x: 106,
        y: 8,
        bitmap: Bitmap::StarBlack
    }));
}

#[test]
fn handshake_events_in_order() {
    let (mut it, mut hw, mut sink) = booted();
    it.handle_line("ESP32?", &mut hw, &mut sink);

    let configured: Vec<(usize, u8)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::SlotConfigured { slot, progress } => Some((*slot, *progress)),
            _ => None,
        })
        .collect();
    assert_eq!(configured, vec![(0, 25), (1, 50), (2, 75), (3, 100)]);
    assert_eq!(sink.events.first(), Some(&AppEvent::HandshakeStarted));
    assert!(sink.events.contains(&AppEvent::StatusChanged(LedStatus::Config)));
    assert!(sink.events.contains(&AppEvent::Ready));
}

#[test]
fn repeated_handshake_reruns_slot_setup_after_stop() {
    let (mut it, mut hw, mut sink) = ready();
    it.handle_line("P", &mut hw, &mut sink);
    assert_eq!(hw.relays, [false; 4]);
    assert_eq!(it.status(), LedStatus::Waiting);
    hw.clear_log();

    let reply = it.handle_line("ESP32?", &mut hw, &mut sink);
    assert_eq!(reply.as_str(), "ESP32 ready");
    assert_eq!(hw.progress_values(), vec![25, 50, 75, 100]);
    assert_eq!(
        hw.calls
            .iter()
            .filter(|c| matches!(c, PanelCall::EnergizeSlot(_)))
            .count(),
        4
    );
    assert_eq!(hw.relays, [true; 4]);
    assert_eq!(it.connected(), [true; 4]);
    assert_eq!(it.status(), LedStatus::Ready);
    assert!(hw.drew(Bitmap::LinkConnected));
    assert_eq!(it.readiness(), Readiness::Ready);
}

#[test]
fn handshake_needs_exact_text() {
    let (mut it, mut hw, mut sink) = booted();
    // "ESP32" without '?' is classified by its first letter: stopping.
    let reply = it.handle_line("ESP32", &mut hw, &mut sink);
    assert_eq!(reply.as_str(), "ACK:E");
    assert_eq!(it.readiness(), Readiness::AwaitingHandshake);
}

// ── Clear-before-present ──────────────────────────────────────

fn run_session(config: PanelConfig) -> MockPanel {
    let (mut it, mut hw, mut sink) = make(config);
    it.boot(&mut hw, &mut sink);
    for line in ["ESP32?", "N:2", "L:4", "Q:1", "S", "D", "E", "P", "X"] {
        it.handle_line(line, &mut hw, &mut sink);
    }
    hw
}

#[test]
fn every_frame_is_cleared_before_present() {
    let hw = run_session(PanelConfig::default());
    assert!(hw.presents() > 10);
    assert!(frames_without_clear(&hw).is_empty());
}

#[test]
fn overlay_ready_transition_is_the_only_uncleared_frame() {
    let hw = run_session(PanelConfig {
        ready_transition: ReadyTransition::Overlay,
        ..PanelConfig::default()
    });
    let bad = frames_without_clear(&hw);
    assert_eq!(bad.len(), 1);
    assert!(bad[0].contains(&PanelCall::Bitmap {
        x: 4,
        y: 38,
        bitmap: Bitmap::LinkConnected
    }));
}

// ── Player counts ─────────────────────────────────────────────

#[test]
fn player_count_lights_first_n_slots() {
    for (line, expected) in [
        ("N:0", [false, false, false, false]),
        ("N:1", [true, false, false, false]),
        ("N:3", [true, true, true, false]),
        ("N:4", [true, true, true, true]),
        ("N:9", [true, true, true, true]),
        ("N:-2", [false, false, false, false]),
        ("N:abc", [false, false, false, false]),
    ] {
        let (mut it, mut hw, mut sink) = ready();
        let reply = it.handle_line(line, &mut hw, &mut sink);

        assert_eq!(reply.as_str(), format!("ACK:{line}"), "{line}");
        let frames = hw.frames();
        assert_eq!(frames.len(), 1, "{line}: one joystick frame");
        assert_eq!(joystick_icons(&frames[0]), expected, "{line}: icons");
        assert_eq!(it.connected(), expected, "{line}: slot model");
        assert_eq!(hw.relays, expected, "{line}: relays");
    }
}

#[test]
fn list_and_quit_redraw_like_new() {
    let (mut it, mut hw, mut sink) = ready();
    assert_eq!(it.handle_line("L:2", &mut hw, &mut sink).as_str(), "ACK:L:2");
    assert_eq!(it.handle_line("Q:1\r", &mut hw, &mut sink).as_str(), "ACK:Q:1");
    assert_eq!(it.connected(), [true, false, false, false]);
    assert!(sink.events.contains(&AppEvent::PlayersChanged {
        verb: PlayerVerb::Quit,
        requested: 1,
        connected: 1
    }));
    assert!(sink.events.contains(&AppEvent::ScreenShown(Screen::Joysticks([
        true, true, false, false
    ]))));
}

#[test]
fn joystick_screen_has_header_but_no_bottom_frame() {
    let (mut it, mut hw, mut sink) = ready();
    it.handle_line("N:2", &mut hw, &mut sink);
    assert!(hw.drew(Bitmap::FrameTop));
    assert!(hw.drew(Bitmap::StatusBanner));
    assert!(!hw.drew(Bitmap::FrameBottom));
}

#[test]
fn second_revision_clamps_negative_to_one() {
    let (mut it, mut hw, mut sink) = make(PanelConfig {
        clamp_floor: PlayerClampFloor::One,
        ..PanelConfig::default()
    });
    it.handle_line("ESP32?", &mut hw, &mut sink);
    let reply = it.handle_line("N:-5", &mut hw, &mut sink);
    assert_eq!(reply.as_str(), "ACK:N:-5");
    assert_eq!(it.connected(), [true, false, false, false]);
}

#[test]
fn player_verbs_before_ready_are_rejected() {
    for line in ["N:2", "L:3", "Q:1", "N"] {
        let (mut it, mut hw, mut sink) = booted();
        let reply = it.handle_line(line, &mut hw, &mut sink);
        assert_eq!(reply.as_str(), "ACK:?", "{line}");
        assert!(hw.calls.is_empty(), "{line}: no side effects");
        assert_eq!(it.readiness(), Readiness::AwaitingHandshake);
        assert_eq!(it.status(), LedStatus::Waiting);
        assert_eq!(
            sink.events,
            vec![AppEvent::Rejected(RejectReason::NotReady)]
        );
    }
}

// ── Unknown input ─────────────────────────────────────────────

#[test]
fn unknown_verb_changes_nothing_in_any_state() {
    for (mut it, mut hw, mut sink) in [booted(), ready()] {
        let before = (it.readiness(), it.connected(), it.status());
        for line in ["X", "", "   ", "hello", "n:2", "?"] {
            let reply = it.handle_line(line, &mut hw, &mut sink);
            assert_eq!(reply.as_str(), "ACK:?", "{line:?}");
        }
        assert!(hw.calls.is_empty());
        assert_eq!((it.readiness(), it.connected(), it.status()), before);
        assert_eq!(
            sink.count(|e| matches!(e, AppEvent::Rejected(RejectReason::UnknownVerb))),
            6
        );
    }
}

#[test]
fn overflow_is_answered_like_unknown() {
    let (mut it, mut hw, mut sink) = ready();
    assert_eq!(it.overflow(&mut sink).as_str(), "ACK:?");
    assert!(hw.calls.is_empty());
    assert_eq!(
        sink.events,
        vec![AppEvent::Rejected(RejectReason::Overflow)]
    );
    // Still ready afterwards.
    assert_eq!(it.handle_line("N:1", &mut hw, &mut sink).as_str(), "ACK:N:1");
}

// ── Session verbs ─────────────────────────────────────────────

#[test]
fn starting_opens_relays_and_shows_rockets() {
    let (mut it, mut hw, mut sink) = ready();
    let reply = it.handle_line("S", &mut hw, &mut sink);
    assert_eq!(reply.as_str(), "ACK:S");
    assert!(hw.drew(Bitmap::Rocket));
    assert!(hw.drew(Bitmap::StartingLabel));
    assert!(hw.drew(Bitmap::StarBlack));
    assert_eq!(hw.count(&PanelCall::DisconnectAll), 1);
    assert_eq!(hw.relays, [false; 4]);
    assert_eq!(it.connected(), [false; 4]);
    assert_eq!(it.status(), LedStatus::Config);
}

#[test]
fn started_matches_starting_visual_with_ready_led() {
    let (mut it, mut hw, mut sink) = ready();
    assert_eq!(it.handle_line("D", &mut hw, &mut sink).as_str(), "ACK:D");
    assert!(hw.drew(Bitmap::Rocket));
    assert_eq!(it.status(), LedStatus::Ready);
    assert_eq!(hw.relays, [false; 4]);
}

#[test]
fn stopping_marks_slots_connected_without_touching_relays() {
    let (mut it, mut hw, mut sink) = ready();
    it.handle_line("N:1", &mut hw, &mut sink);
    hw.clear_log();

    assert_eq!(it.handle_line("E", &mut hw, &mut sink).as_str(), "ACK:E");
    assert!(hw.drew(Bitmap::Zzz));
    assert!(hw.drew(Bitmap::StoppingLabel));
    for slot in 0..4 {
        assert!(hw.drew(Bitmap::JoystickOn(slot)), "slot {slot} lit");
    }
    assert_eq!(it.connected(), [true; 4]);
    assert_eq!(hw.relays, [true, false, false, false]);
    assert!(
        !hw.calls.iter().any(|c| matches!(
            c,
            PanelCall::DisconnectAll | PanelCall::SetSlot { .. } | PanelCall::EnergizeSlot(_)
        )),
        "relays untouched"
    );
    assert_eq!(it.status(), LedStatus::Config);
}

#[test]
fn start_then_stop_returns_to_idle_pattern_with_relays_open() {
    let (mut it, mut hw, mut sink) = ready();
    it.handle_line("N:4", &mut hw, &mut sink);
    assert_eq!(it.handle_line("S", &mut hw, &mut sink).as_str(), "ACK:S");
    assert_eq!(it.handle_line("P", &mut hw, &mut sink).as_str(), "ACK:P");

    assert_eq!(it.status(), LedStatus::Waiting);
    assert_eq!(hw.relays, [false; 4]);
    assert_eq!(it.connected(), [false; 4]);
    assert!(hw.drew(Bitmap::Bye));
    assert!(hw.drew(Bitmap::StoppedLabel));
    assert!(sink.events.contains(&AppEvent::Session(SessionVerb::Stopped)));
    // Readiness never regresses.
    assert_eq!(it.readiness(), Readiness::Ready);
}

#[test]
fn session_verbs_work_before_handshake() {
    let (mut it, mut hw, mut sink) = booted();
    assert_eq!(it.handle_line("Stop", &mut hw, &mut sink).as_str(), "ACK:S");
    assert_eq!(it.handle_line("P", &mut hw, &mut sink).as_str(), "ACK:P");
    assert_eq!(it.readiness(), Readiness::AwaitingHandshake);
    assert_eq!(hw.count(&PanelCall::DisconnectAll), 2);
}
