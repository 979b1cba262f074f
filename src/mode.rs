//! POSIX permission mode strings.
//!
//! A mode string is either an absolute octal value (`"755"`, `"0700"`,
//! `"1777"`) or a comma separated list of symbolic clauses in the `chmod(1)`
//! grammar:
//!
//! ```text
//! clause := who* (op perm*)+
//! who    := 'u' | 'g' | 'o' | 'a'
//! op     := '+' | '-' | '='
//! perm   := 'r' | 'w' | 'x' | 'X' | 's' | 't' | 'u' | 'g' | 'o'
//! ```
//!
//! Parsing and resolving are separate steps: [`Mode::parse`] validates the
//! string once, [`Mode::resolve`] turns it into a bitmask for a given starting
//! mode. Clauses without a `who` part are masked by the umask.
//!
//! # Examples
//!
//! ```
//! use fs_shim::Mode;
//!
//! let mode = Mode::parse("u=rwx,go=rx").unwrap();
//! assert_eq!(mode.resolve(0, 0o022, true), 0o755);
//!
//! let mode = Mode::parse("+x").unwrap();
//! assert_eq!(mode.resolve(0o644, 0o022, false), 0o755);
//! ```

use thiserror::Error;

const PERMISSION_BITS: u32 = 0o7777;
const STICKY: u32 = 0o1000;
const EXECUTE_ALL: u32 = 0o111;

const WHO_USER: u32 = 0o4700;
const WHO_GROUP: u32 = 0o2070;
const WHO_OTHER: u32 = 0o0007;
const WHO_ALL: u32 = 0o6777;

/// Reasons a mode string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    /// Nothing to parse.
    #[error("mode string is empty")]
    Empty,

    /// Octal value above `7777`.
    #[error("octal mode {0} is out of range (maximum 7777)")]
    OctalOutOfRange(String),

    /// A character that is not valid at this position.
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    /// A clause without any of `+`, `-` or `=`.
    #[error("expected one of '+', '-', '=' at position {position}")]
    MissingOperator { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Remove,
    Set,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Action {
    op: Op,
    bits: u32,
    /// `X`: execute only for directories or when some execute bit is already set.
    conditional_exec: bool,
    /// Shifts of the classes to copy from (`u` = 6, `g` = 3, `o` = 0).
    copy_from: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    /// Zero when no `who` was given.
    who: u32,
    actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    Absolute(u32),
    Symbolic(Vec<Clause>),
}

/// A parsed permission mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    repr: Repr,
}

impl Mode {
    /// Parses an octal or symbolic mode string.
    pub fn parse(input: &str) -> Result<Self, ModeError> {
        if input.is_empty() {
            return Err(ModeError::Empty);
        }

        let repr = if input.starts_with(|c: char| c.is_ascii_digit()) {
            Repr::Absolute(parse_octal(input)?)
        } else {
            Repr::Symbolic(parse_symbolic(input)?)
        };

        Ok(Self { repr })
    }

    /// Returns true for octal modes, which ignore the starting mode and umask.
    pub fn is_absolute(&self) -> bool {
        matches!(self.repr, Repr::Absolute(_))
    }

    /// Applies the mode to `base` and returns the resulting permission bits.
    ///
    /// `umask` masks clauses that have no `who` part. `is_dir` makes `X`
    /// grant execute permission regardless of `base`.
    pub fn resolve(&self, base: u32, umask: u32, is_dir: bool) -> u32 {
        let clauses = match &self.repr {
            Repr::Absolute(bits) => return *bits,
            Repr::Symbolic(clauses) => clauses,
        };

        let umask_mask = PERMISSION_BITS & !(umask & 0o777);
        let mut mode = base & PERMISSION_BITS;

        for clause in clauses {
            for action in &clause.actions {
                let mut bits = action.bits;

                for &shift in &action.copy_from {
                    let class = (mode >> shift) & 0o7;
                    bits |= (class << 6) | (class << 3) | class;
                }

                if action.conditional_exec && (is_dir || mode & EXECUTE_ALL != 0) {
                    bits |= EXECUTE_ALL;
                }

                let who_mask = if clause.who == 0 {
                    umask_mask
                } else if bits & STICKY != 0 && clause.who & !WHO_OTHER != 0 {
                    clause.who | STICKY
                } else {
                    clause.who
                };

                let effective = bits & who_mask;

                mode = match action.op {
                    Op::Add => mode | effective,
                    Op::Remove => mode & !effective,
                    Op::Set => {
                        let cleared = if clause.who == 0 {
                            PERMISSION_BITS
                        } else {
                            who_mask
                        };
                        (mode & !cleared) | effective
                    }
                };
            }
        }

        mode
    }
}

fn parse_octal(input: &str) -> Result<u32, ModeError> {
    let mut value: u32 = 0;

    for (position, ch) in input.char_indices() {
        let digit = ch
            .to_digit(8)
            .ok_or(ModeError::UnexpectedChar { ch, position })?;

        value = value * 8 + digit;
        if value > PERMISSION_BITS {
            return Err(ModeError::OctalOutOfRange(input.to_string()));
        }
    }

    Ok(value)
}

fn parse_symbolic(input: &str) -> Result<Vec<Clause>, ModeError> {
    let mut clauses = Vec::new();
    let mut offset = 0;

    for text in input.split(',') {
        clauses.push(parse_clause(text, offset)?);
        offset += text.len() + 1;
    }

    Ok(clauses)
}

fn parse_clause(text: &str, offset: usize) -> Result<Clause, ModeError> {
    let mut chars = text.char_indices().peekable();
    let mut who = 0;

    while let Some(&(_, ch)) = chars.peek() {
        let bits = match ch {
            'u' => WHO_USER,
            'g' => WHO_GROUP,
            'o' => WHO_OTHER,
            'a' => WHO_ALL,
            _ => break,
        };
        who |= bits;
        chars.next();
    }

    let mut actions = Vec::new();

    while let Some((position, ch)) = chars.next() {
        let op = match ch {
            '+' => Op::Add,
            '-' => Op::Remove,
            '=' => Op::Set,
            _ => {
                return Err(ModeError::UnexpectedChar {
                    ch,
                    position: offset + position,
                });
            }
        };

        let mut action = Action {
            op,
            bits: 0,
            conditional_exec: false,
            copy_from: Vec::new(),
        };

        while let Some(&(_, ch)) = chars.peek() {
            match ch {
                'r' => action.bits |= 0o444,
                'w' => action.bits |= 0o222,
                'x' => action.bits |= EXECUTE_ALL,
                'X' => action.conditional_exec = true,
                's' => action.bits |= 0o6000,
                't' => action.bits |= STICKY,
                'u' => action.copy_from.push(6),
                'g' => action.copy_from.push(3),
                'o' => action.copy_from.push(0),
                _ => break,
            }
            chars.next();
        }

        actions.push(action);
    }

    if actions.is_empty() {
        return Err(ModeError::MissingOperator {
            position: offset + text.len(),
        });
    }

    Ok(Clause { who, actions })
}

/// Reads the process umask.
///
/// On Linux the value comes from the `Umask:` line of `/proc/self/status`.
/// Elsewhere, or when that file cannot be read, `umask(2)` is set to zero and
/// restored, which briefly unmasks files created by other threads.
pub fn process_umask() -> u32 {
    if let Some(umask) = proc_status_umask() {
        return umask;
    }

    unsafe {
        let previous = libc::umask(0);
        libc::umask(previous);
        previous as u32
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn proc_status_umask() -> Option<u32> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;

    status
        .lines()
        .find_map(|line| line.strip_prefix("Umask:"))
        .and_then(|value| u32::from_str_radix(value.trim(), 8).ok())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn proc_status_umask() -> Option<u32> {
    None
}
