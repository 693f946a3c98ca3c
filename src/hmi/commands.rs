//! Serial command table and dispatcher.
//!
//! | Command  | Length | Effect |
//! | -------- | ------ | ------ |
//! | `1 XXX`  | 5 | set duty, tenths of a percent |
//! | `2 XXXX` | 6 | set period, milliseconds |
//! | `3 XXX`  | 5 | set servo angle, degrees |
//! | `4`      | 1 | read servo data |
//! | `0`      | 1 | print help |
//!
//! A line matches a descriptor only if it starts with the descriptor header
//! and has exactly the declared length. The first match in table order wins.

use crate::error::DispatchError;

/// Kind of command a descriptor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum CommandKind {
    SetDuty,
    SetPeriod,
    SetServoAngle,
    ReadServoData,
    Help,
}

/// A parsed command with its numeric payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Command {
    /// Duty in tenths of a percent
    SetDuty(u32),
    /// Period in milliseconds
    SetPeriod(u32),
    /// Angle in degrees
    SetServoAngle(u32),
    ReadServoData,
    Help,
}

/// Static description of one serial command.
#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    /// Exact line length, terminator excluded
    pub size: usize,
    /// Bytes the line must start with
    pub header: &'static [u8],
    pub kind: CommandKind,
    /// Line printed by the help command; `None` ends the help listing
    pub help: Option<&'static str>,
}

impl CommandDescriptor {
    /// Returns `true` if `line` has this descriptor's header and exact length.
    pub fn matches(&self, line: &[u8]) -> bool {
        line.len() == self.size && line.starts_with(self.header)
    }

    /// Builds the command for a line this descriptor matched.
    fn parse(&self, line: &[u8]) -> Command {
        let arg = &line[self.header.len()..];
        match self.kind {
            CommandKind::SetDuty => Command::SetDuty(parse_decimal(arg)),
            CommandKind::SetPeriod => Command::SetPeriod(parse_decimal(arg)),
            CommandKind::SetServoAngle => Command::SetServoAngle(parse_decimal(arg)),
            CommandKind::ReadServoData => Command::ReadServoData,
            CommandKind::Help => Command::Help,
        }
    }
}

/// Command table, in match priority order.
pub static COMMANDS: [CommandDescriptor; 5] = [
    CommandDescriptor {
        size: 5,
        header: b"1 ",
        kind: CommandKind::SetDuty,
        help: Some("1 XXX: Set duty cycle : ex - \"1 505\" -> 50.5%"),
    },
    CommandDescriptor {
        size: 6,
        header: b"2 ",
        kind: CommandKind::SetPeriod,
        help: Some("2 XXXX: Set period (ms): ex - \"2 0020\" -> 20ms"),
    },
    CommandDescriptor {
        size: 5,
        header: b"3 ",
        kind: CommandKind::SetServoAngle,
        help: Some("3 XXX: Set servo motor angle (0 - 180): ex - \"3 120\" -> 120 degrees"),
    },
    CommandDescriptor {
        size: 1,
        header: b"4",
        kind: CommandKind::ReadServoData,
        help: Some("4 : ex - \"4\" Read info about Servo PWM (Period, Duty, Angle)"),
    },
    CommandDescriptor {
        size: 1,
        header: b"0",
        kind: CommandKind::Help,
        help: None,
    },
];

/// Finds the first descriptor matching `line`.
pub fn lookup(line: &[u8]) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|cmd| cmd.matches(line))
}

/// Parses a framed line into a command.
///
/// # Errors
/// [`DispatchError::NotFound`] if no descriptor matches both header and length.
pub fn parse(line: &[u8]) -> Result<Command, DispatchError> {
    lookup(line).map(|cmd| cmd.parse(line)).ok_or(DispatchError::NotFound)
}

/// Help lines in table order, up to the first descriptor without help text.
pub fn help_lines() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map_while(|cmd| cmd.help)
}

/// Reads a decimal number the way C `atoi` does.
///
/// Leading spaces and tabs are skipped, an optional sign is accepted, and
/// digits are read up to the first non-digit. Text without digits yields 0.
/// A negative value wraps into the unsigned range, where it fails any bound
/// check downstream.
pub fn parse_decimal(text: &[u8]) -> u32 {
    let mut bytes = text
        .iter()
        .copied()
        .skip_while(|b| *b == b' ' || *b == b'\t')
        .peekable();

    let negative = match bytes.peek() {
        Some(&b'-') => {
            bytes.next();
            true
        }
        Some(&b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let value = bytes
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, d| acc.wrapping_mul(10).wrapping_add(u32::from(d - b'0')));

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_duty() {
        assert_eq!(parse(b"1 505"), Ok(Command::SetDuty(505)));
    }

    #[test]
    fn test_parse_each_command() {
        assert_eq!(parse(b"2 9999"), Ok(Command::SetPeriod(9999)));
        assert_eq!(parse(b"3 120"), Ok(Command::SetServoAngle(120)));
        assert_eq!(parse(b"4"), Ok(Command::ReadServoData));
        assert_eq!(parse(b"0"), Ok(Command::Help));
    }

    #[test]
    fn test_wrong_length_is_not_found() {
        assert_eq!(parse(b"1 5050"), Err(DispatchError::NotFound));
        assert_eq!(parse(b"1 50"), Err(DispatchError::NotFound));
        assert_eq!(parse(b"2 999"), Err(DispatchError::NotFound));
        assert_eq!(parse(b"44"), Err(DispatchError::NotFound));
        assert_eq!(parse(b"0 "), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_unknown_header_is_not_found() {
        assert_eq!(parse(b"5"), Err(DispatchError::NotFound));
        assert_eq!(parse(b"9 123"), Err(DispatchError::NotFound));
        assert_eq!(parse(b"1x505"), Err(DispatchError::NotFound));
    }

    #[test]
    fn test_lengths_outside_table_never_match() {
        let sizes: std::vec::Vec<usize> = COMMANDS.iter().map(|c| c.size).collect();
        for len in 0..=crate::config::MAX_LINE_LEN {
            if sizes.contains(&len) {
                continue;
            }
            for first in [b'0', b'1', b'2', b'3', b'4'] {
                let mut line = std::vec![b' '; len];
                if let Some(b) = line.first_mut() {
                    *b = first;
                }
                assert_eq!(parse(&line), Err(DispatchError::NotFound), "len {}", len);
            }
        }
    }

    #[test]
    fn test_exactly_one_descriptor_matches() {
        let lines: [&[u8]; 5] = [b"1 505", b"2 1000", b"3 180", b"4", b"0"];
        for line in lines {
            let hits = COMMANDS.iter().filter(|c| c.matches(line)).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_help_lines_stop_at_sentinel() {
        let lines: std::vec::Vec<&str> = help_lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("1 XXX"));
        assert!(lines[3].starts_with("4 :"));
    }

    #[test]
    fn test_parse_decimal_atoi_semantics() {
        assert_eq!(parse_decimal(b"505"), 505);
        assert_eq!(parse_decimal(b"0020"), 20);
        assert_eq!(parse_decimal(b"  42"), 42);
        assert_eq!(parse_decimal(b"+7"), 7);
        assert_eq!(parse_decimal(b"12a"), 12);
        assert_eq!(parse_decimal(b"abc"), 0);
        assert_eq!(parse_decimal(b""), 0);
        assert_eq!(parse_decimal(b"-50"), 50u32.wrapping_neg());
    }

    #[test]
    fn test_malformed_payload_parses_partially() {
        assert_eq!(parse(b"1 5x5"), Ok(Command::SetDuty(5)));
        assert_eq!(parse(b"1 abc"), Ok(Command::SetDuty(0)));
    }
}
