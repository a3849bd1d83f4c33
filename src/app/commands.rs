//! Inbound commands from the host serial line.
//!
//! Each trimmed line is classified by its first character into a
//! [`Command`] that the [`CommandInterpreter`](super::interpreter::CommandInterpreter)
//! validates against readiness and acts upon. Classification never fails:
//! anything unrecognised becomes [`Command::Unknown`].

/// Exact text of the handshake line.
pub const HANDSHAKE: &str = "ESP32?";

/// Which player-count verb was received. All three redraw the same way;
/// the verb is echoed back in the acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerVerb {
    /// `N`: new game.
    New,
    /// `L`: player list changed.
    List,
    /// `Q`: a player quit.
    Quit,
}

impl PlayerVerb {
    pub const fn as_char(self) -> char {
        match self {
            Self::New => 'N',
            Self::List => 'L',
            Self::Quit => 'Q',
        }
    }
}

/// Session phase verbs accepted in any readiness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionVerb {
    /// `S`: host is starting a game.
    Starting,
    /// `D`: host finished starting.
    Started,
    /// `E`: host is stopping.
    Stopping,
    /// `P`: host stopped.
    Stopped,
}

impl SessionVerb {
    pub const fn as_char(self) -> char {
        match self {
            Self::Starting => 'S',
            Self::Started => 'D',
            Self::Stopping => 'E',
            Self::Stopped => 'P',
        }
    }
}

/// One classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Handshake,
    /// `N:<n>`, `L:<n>`, `Q:<n>`. `line` is the trimmed text, echoed in the ack.
    Players {
        verb: PlayerVerb,
        count: i32,
        line: &'a str,
    },
    Session(SessionVerb),
    Unknown,
}

impl<'a> Command<'a> {
    /// Classify a line. Surrounding whitespace (including `\r`) is ignored.
    pub fn parse(raw: &'a str) -> Self {
        let line = raw.trim();
        if line == HANDSHAKE {
            return Self::Handshake;
        }

        let Some(first) = line.chars().next() else {
            return Self::Unknown;
        };

        let verb = match first {
            'N' => PlayerVerb::New,
            'L' => PlayerVerb::List,
            'Q' => PlayerVerb::Quit,
            'S' => return Self::Session(SessionVerb::Starting),
            'D' => return Self::Session(SessionVerb::Started),
            'E' => return Self::Session(SessionVerb::Stopping),
            'P' => return Self::Session(SessionVerb::Stopped),
            _ => return Self::Unknown,
        };

        let payload = match line.find(':') {
            Some(idx) => &line[idx + 1..],
            None => line,
        };

        Self::Players {
            verb,
            count: parse_count(payload),
            line,
        }
    }
}

/// Lenient integer parse: optional leading whitespace, optional sign, then
/// as many decimal digits as follow. Anything else yields 0; overflow
/// saturates at the `i32` bounds.
pub fn parse_count(text: &str) -> i32 {
    let bytes = text.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i32::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Clamp a requested player count into `[floor, 4]`.
pub fn clamp_players(count: i32, floor: i32) -> usize {
    if count > 4 {
        4
    } else if count < 0 {
        floor as usize
    } else {
        count as usize
    }
}
