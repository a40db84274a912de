// src/core/sanitize.rs

/// Decode the handful of entities that show up in city CMS output.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&rsquo;", "'")
        .replace("&ndash;", "-")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Stable, filesystem-friendly id for a source name ("Austin Parks & Rec" → "austin_parks_rec").
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch.to_ascii_lowercase()); last_us = false; }
        else if !last_us { out.push('_'); last_us = true; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("source") } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_and_whitespace() {
        assert_eq!(normalize_ws(&normalize_entities("Pan&nbsp;Am \n Park &amp; Pool")), "Pan Am Park & Pool");
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slug("Austin Parks & Rec"), "austin_parks_rec");
        assert_eq!(slug("OpenStreetMap"), "openstreetmap");
        assert_eq!(slug("&&"), "source");
    }
}
