use crate::types::db::user;
use crate::types::{LiveMode, Role};

/// First line of every exported roster
pub const CSV_HEADER: &str = "username,password,contactNumber,liveMode,role";

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields (username, password, contactNumber, liveMode)";

/// Render users as roster CSV
///
/// Rows follow the input order. The password column carries the stored hash.
/// Fields are written verbatim with no quoting.
pub fn encode(users: &[user::Model]) -> String {
    let rows: Vec<String> = users
        .iter()
        .map(|u| {
            format!(
                "{},{},{},{},{}",
                u.username,
                u.password_hash,
                u.contact_number,
                u.live_mode.as_str(),
                u.role.as_str()
            )
        })
        .collect();

    format!("{}\n{}", CSV_HEADER, rows.join("\n"))
}

/// One data line of an uploaded roster, fields trimmed but not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLine {
    /// 1-based position among non-blank lines; the header is line 1
    pub line_number: usize,
    pub username: String,
    pub password: String,
    pub contact_number: String,
    pub live_mode: String,
    pub role: String,
}

impl RosterLine {
    /// Any of the four mandatory columns is empty
    pub fn is_missing_required(&self) -> bool {
        self.username.is_empty()
            || self.password.is_empty()
            || self.contact_number.is_empty()
            || self.live_mode.is_empty()
    }

    /// Role column, blank meaning MEMBER
    pub fn role(&self) -> Result<Role, String> {
        if self.role.is_empty() {
            Ok(Role::Member)
        } else {
            self.role.parse()
        }
    }

    pub fn live_mode(&self) -> Result<LiveMode, String> {
        self.live_mode.parse()
    }
}

/// Split uploaded text into data lines
///
/// Blank lines are dropped before numbering and the first remaining line is
/// treated as the header. Fields are comma separated with no quoting, so a
/// comma inside a value shifts the columns that follow.
pub fn parse(text: &str) -> Vec<RosterLine> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .skip(1)
        .map(|(index, line)| {
            let mut fields = line.trim().split(',').map(|field| field.trim().to_string());
            let mut next = || fields.next().unwrap_or_default();

            RosterLine {
                line_number: index + 1,
                username: next(),
                password: next(),
                contact_number: next(),
                live_mode: next(),
                role: next(),
            }
        })
        .collect()
}
