use crate::config::Columns;
use crate::error::PipelineError;

/// Header name to 1-based column index, resolved once per event and passed
/// around as a value. Missing required headers surface as one typed error
/// listing every absent column.
#[derive(Debug, Clone)]
pub struct Schema {
    pub status: u32,
    pub prompt: u32,
    pub email: u32,
    pub response: u32,
    /// The diagnostics column is optional; sheets without it just lose the
    /// error detail text.
    pub error_details: Option<u32>,
    pub send_flag: u32,
    pub timestamp: u32,
    pub student_name: u32,
}

impl Schema {
    pub fn resolve(header: &[String], columns: &Columns) -> Result<Self, PipelineError> {
        let find = |name: &str| -> Option<u32> {
            header
                .iter()
                .position(|h| h.trim() == name)
                .map(|i| i as u32 + 1)
        };

        let status = find(&columns.status);
        let prompt = find(&columns.prompt);
        let email = find(&columns.email);
        let response = find(&columns.response);
        let send_flag = find(&columns.send_flag);

        let missing: Vec<&str> = [
            (status, columns.status.as_str()),
            (prompt, columns.prompt.as_str()),
            (email, columns.email.as_str()),
            (response, columns.response.as_str()),
            (send_flag, columns.send_flag.as_str()),
        ]
        .iter()
        .filter(|(col, _)| col.is_none())
        .map(|(_, name)| *name)
        .collect();

        if let (Some(status), Some(prompt), Some(email), Some(response), Some(send_flag)) =
            (status, prompt, email, response, send_flag)
        {
            return Ok(Self {
                status,
                prompt,
                email,
                response,
                error_details: find(&columns.error_details),
                send_flag,
                timestamp: columns.timestamp_col,
                student_name: columns.student_name_col,
            });
        }

        Err(PipelineError::MissingColumns(missing.join(", ")))
    }

    /// Cell accessor over a row already padded to header width.
    pub fn cell<'a>(&self, row: &'a [String], col: u32) -> &'a str {
        (col as usize)
            .checked_sub(1)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}
