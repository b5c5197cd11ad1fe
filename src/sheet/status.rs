use std::fmt;

/// Row status as written to the Status column. `Generating` is the only
/// transient value; a processing pass always overwrites it with a terminal
/// one before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Generating,
    Generated,
    Sent,
    InvalidEmail,
    ApiKeyMissing,
    AiFailed,
    ScriptFailed,
    SendFailed,
}

impl Status {
    pub fn as_cell(&self) -> &'static str {
        match self {
            Status::Generating => "Generating",
            Status::Generated => "Generated",
            Status::Sent => "Sent",
            Status::InvalidEmail => "Error: Invalid Email",
            Status::ApiKeyMissing => "Error: API Key Missing",
            Status::AiFailed => "Error: AI Failed",
            Status::ScriptFailed => "Error: Script Failed",
            Status::SendFailed => "Error: Send Failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cell())
    }
}
