#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3000);
        let api_url = std::env::var("TASKBOARD_API_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{}", port));
        Self { port, api_url }
    }

}
