use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
    time::Duration,
};

use directories::BaseDirs;

use crate::language::Language;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(default_config_path())
    }

    /// Load defaults, then the rc file at `config_path`, then the environment.
    pub fn load_from(config_path: PathBuf) -> Self {
        let mut map = default_map();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                parse_rc(BufReader::new(file), &mut map);
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from)
    }

    /// Gemini credential. The Vite-era variable name is honoured as a fallback.
    pub fn api_key(&self) -> Option<String> {
        self.get("GEMINI_API_KEY")
            .or_else(|| self.get("VITE_GEMINI_API_KEY"))
            .filter(|k| !k.trim().is_empty())
    }

    /// `None` means no timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        let secs = self
            .get("REQUEST_TIMEOUT")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(60);
        (secs > 0).then(|| Duration::from_secs(secs))
    }

    pub fn default_language(&self) -> Language {
        self.get("DEFAULT_LANGUAGE")
            .and_then(|id| id.parse().ok())
            .unwrap_or_default()
    }
}

fn parse_rc<R: BufRead>(reader: R, map: &mut HashMap<String, String>) {
    for line in reader.lines().map_while(Result::ok) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            map.insert(k.trim().to_string(), v.trim().to_string());
        }
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "GEMINI_API_KEY",
        "VITE_GEMINI_API_KEY",
        "API_BASE_URL",
        "DEFAULT_MODEL",
        "REQUEST_TIMEOUT",
        "DEFAULT_LANGUAGE",
        "WORD_WRAP",
        "LINE_NUMBERS",
        "LOG_FILE",
    ];

    KEYS.contains(&k) || k.starts_with("AICODE_") || k.starts_with("GEMINI_")
}

fn default_config_path() -> PathBuf {
    config_dir().join(".aicoderc")
}

fn config_dir() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("aicode")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert("API_BASE_URL".into(), "default".into());
    m.insert("DEFAULT_MODEL".into(), "gemini-pro".into());
    m.insert("REQUEST_TIMEOUT".into(), "60".into());
    m.insert("DEFAULT_LANGUAGE".into(), Language::default().id().into());

    // Bools as strings
    m.insert("WORD_WRAP".into(), "true".into());
    m.insert("LINE_NUMBERS".into(), "true".into());

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rc_file_skips_comments_and_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# model override").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "AICODE_TEST_MODEL = gemini-1.5-flash").unwrap();
        writeln!(file, "not a pair").unwrap();

        let cfg = Config::load_from(file.path().to_path_buf());
        assert_eq!(cfg.get("AICODE_TEST_MODEL").as_deref(), Some("gemini-1.5-flash"));
        assert!(cfg.get("not a pair").is_none());
    }

    #[test]
    fn missing_rc_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(dir.path().join("absent"));
        assert!(cfg.get("API_BASE_URL").is_some());
        assert!(cfg.get("LINE_NUMBERS").is_some());
    }

    #[test]
    fn zero_timeout_disables_it() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "AICODE_UNUSED=1").unwrap();
        let mut cfg = Config::load_from(file.path().to_path_buf());
        if env::var("REQUEST_TIMEOUT").is_err() {
            cfg.inner.insert("REQUEST_TIMEOUT".into(), "0".into());
            assert_eq!(cfg.request_timeout(), None);
            cfg.inner.insert("REQUEST_TIMEOUT".into(), "5".into());
            assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(5)));
        }
    }
}
