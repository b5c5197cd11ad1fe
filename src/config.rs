const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Clone)]
pub struct Config {
    /// Absent is a value, not an error. Callers branch on it explicitly.
    pub gemini_api_key: Option<String>,
    pub gemini_endpoint: String,
    pub mail_relay_url: String,
    /// Admin notifications are dropped (with a log line) when unset.
    pub admin_email: Option<String>,
    pub host: String,
    pub port: u16,
    pub columns: Columns,
}

/// Column layout of the response sheet. All header literals live here;
/// nothing in the pipeline names a column directly.
#[derive(Clone, Debug)]
pub struct Columns {
    pub status: String,
    pub prompt: String,
    pub email: String,
    pub response: String,
    pub error_details: String,
    pub send_flag: String,
    /// The form writes the timestamp and student name at fixed positions,
    /// so these two are addressed by 1-based column number, not header.
    pub timestamp_col: u32,
    pub student_name_col: u32,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            status: "Status".to_string(),
            prompt: "Ask AI".to_string(),
            email: "Email address".to_string(),
            response: "AI Response".to_string(),
            error_details: "Error Details".to_string(),
            send_flag: "Send Email?".to_string(),
            timestamp_col: 1,
            student_name_col: 2,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let gemini_endpoint = std::env::var("GEMINI_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_GEMINI_ENDPOINT.to_string());

        let mail_relay_url = std::env::var("MAIL_RELAY_URL")
            .unwrap_or_else(|_| "http://localhost:8025/api/send".to_string());

        let admin_email = std::env::var("ADMIN_EMAIL")
            .ok()
            .filter(|a| !a.trim().is_empty());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5080".to_string())
            .parse()
            .unwrap_or(5080);

        Self {
            gemini_api_key,
            gemini_endpoint,
            mail_relay_url,
            admin_email,
            host,
            port,
            columns: Columns::default(),
        }
    }
}
