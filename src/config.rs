use anyhow::{Context, Result, bail};
use std::fmt;
use std::path::{Path, PathBuf};

/// Public API root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/v2";

/// Bearer credential. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, `https://api.digitalocean.com/v2` unless overridden.
    pub url: String,
    /// Personal access token sent as `Authorization: Bearer <token>`.
    pub token: Token,
    /// Whether to verify TLS certificates.
    pub verify: bool,
}

#[derive(Debug, Default, PartialEq)]
struct RcConfig {
    url: Option<String>,
    token: Option<String>,
    verify: Option<bool>,
}

pub(crate) fn load_config(
    token: Option<String>,
    url: Option<String>,
    verify: Option<bool>,
) -> Result<ClientConfig> {
    let mut token = token.or_else(|| std::env::var("DIGITALOCEAN_TOKEN").ok());
    let mut url = url.or_else(|| std::env::var("DOAPI_URL").ok());

    let rc_candidates = rc_candidates();
    let mut file_verify: Option<bool> = None;

    if token.is_none() || url.is_none() || verify.is_none() {
        for rc_path in &rc_candidates {
            if rc_path.exists() {
                let cfg = read_rc(rc_path).with_context(|| {
                    format!("failed to read configuration file {}", rc_path.display())
                })?;

                if token.is_none() {
                    token = cfg.token;
                }
                if url.is_none() {
                    url = cfg.url;
                }
                file_verify = cfg.verify;
                break;
            }
        }
    }

    let token = match token {
        Some(v) if !v.trim().is_empty() => Token::new(v),
        _ => {
            if !rc_candidates.is_empty() {
                bail!(
                    "Missing configuration: token (set DIGITALOCEAN_TOKEN or put `token:` in one of: {})",
                    rc_candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            bail!("Missing configuration: token (set DIGITALOCEAN_TOKEN or create .doapirc)");
        }
    };

    let url = url
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let verify = verify.or(file_verify).unwrap_or(true);

    Ok(ClientConfig { url, token, verify })
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rc(&text))
}

fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    // `token:` may be followed by the value on the next line.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(pk) = pending_key.take() {
            // URLs carry a colon, so only the token may continue without one.
            if pk == "token" && !line.contains(':') {
                cfg.token = Some(strip_quotes(line).to_string());
                continue;
            }
            if pk == "url" && (line.starts_with("http://") || line.starts_with("https://")) {
                cfg.url = Some(strip_quotes(line).to_string());
                continue;
            }
        }

        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            match k {
                "token" => {
                    if !v.is_empty() {
                        cfg.token = Some(v.to_string());
                    } else {
                        pending_key = Some("token");
                    }
                }
                "url" => {
                    if !v.is_empty() {
                        cfg.url = Some(v.to_string());
                    } else {
                        pending_key = Some("url");
                    }
                }
                "verify" => {
                    if !v.is_empty() {
                        cfg.verify = Some(!matches!(v, "0" | "false" | "no"));
                    }
                }
                _ => {}
            }
        }
    }

    cfg
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn rc_candidates() -> Vec<PathBuf> {
    // 1) DOAPI_RC (explicit)
    // 2) ./.doapirc
    // 3) ~/.doapirc
    if let Ok(p) = std::env::var("DOAPI_RC") {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".doapirc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".doapirc"));
    }
    v
}
