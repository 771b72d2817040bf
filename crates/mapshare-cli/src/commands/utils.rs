use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, TimeZone};

pub fn format_timestamp(timestamp: Option<i64>) -> String {
    let Some(ts) = timestamp else {
        return "-".to_string();
    };

    let datetime: DateTime<Local> = match Local.timestamp_millis_opt(ts).single() {
        Some(dt) => dt,
        None => return "-".to_string(),
    };

    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn preview_text(input: &str, max_len: usize) -> String {
    if input.chars().count() <= max_len {
        return input.to_string();
    }

    let mut preview = input.chars().take(max_len).collect::<String>();
    preview.push('…');
    preview
}

/// Map code from `--code` or `--file`; exactly one must be given.
pub fn load_code(code: Option<String>, file: Option<&str>) -> Result<String> {
    match (code, file) {
        (Some(code), None) => Ok(code),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read map code from {}", path)),
        (None, None) => bail!("Provide the map code with --code or --file"),
        (Some(_), Some(_)) => bail!("Use either --code or --file, not both"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_text() {
        assert_eq!(preview_text("Parkour", 10), "Parkour");
        assert_eq!(preview_text("Parkour Paradise", 7), "Parkour…");
        assert_eq!(preview_text("ÄÖÜäöü", 6), "ÄÖÜäöü");
    }

    #[test]
    fn test_format_timestamp_none() {
        assert_eq!(format_timestamp(None), "-");
    }

    #[test]
    fn test_load_code() {
        assert_eq!(load_code(Some("1234".to_string()), None).unwrap(), "1234");
        assert!(load_code(None, None).is_err());

        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("map.txt");
        std::fs::write(&path, "9876-5432").unwrap();
        let loaded = load_code(None, Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded, "9876-5432");
    }
}
