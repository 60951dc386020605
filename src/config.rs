use config::Config;

/// Runtime settings. Defaults target the public sevsu.ru schedule page;
/// every field can be overridden from the environment with a `SEVSU_`
/// prefix (e.g. `SEVSU_DB_PATH`, `SEVSU_TIMEOUT_SECS`).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root prepended to relative file links.
    pub base_url: String,
    /// Page listing schedules for every institute.
    pub schedule_url: String,
    /// Outbound User-Agent header.
    pub user_agent: String,
    /// Abort threshold for each HTTP request, in seconds.
    pub timeout_secs: u64,
    pub db_path: String,
    pub download_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.sevsu.ru".into(),
            schedule_url: "https://www.sevsu.ru/univers/shedule".into(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:99.0) Gecko/20100101 Firefox/99.0".into(),
            timeout_secs: 30,
            db_path: "data/schedule.sqlite".into(),
            download_dir: "data/files".into(),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let mut s = Settings::default();
        let env = Config::builder()
            .add_source(config::Environment::with_prefix("SEVSU"))
            .build()
            .unwrap_or_default();
        if let Ok(v) = env.get_string("base_url") {
            s.base_url = v;
        }
        if let Ok(v) = env.get_string("schedule_url") {
            s.schedule_url = v;
        }
        if let Ok(v) = env.get_string("user_agent") {
            s.user_agent = v;
        }
        if let Ok(v) = env.get_int("timeout_secs") {
            s.timeout_secs = v as u64;
        }
        if let Ok(v) = env.get_string("db_path") {
            s.db_path = v;
        }
        if let Ok(v) = env.get_string("download_dir") {
            s.download_dir = v;
        }
        s
    }
}
