// Recovery of a JSON object embedded in free-form model output

/// Find the first balanced `{...}` object in `content`
///
/// A fenced ```json block wins when present. Braces inside JSON string
/// literals (including escaped quotes) do not count towards the balance.
pub fn extract_json_object(content: &str) -> Option<&str> {
    if let Some(fence) = content.find("```json") {
        let body_start = fence + "```json".len();
        if let Some(len) = content[body_start..].find("```") {
            let body = &content[body_start..body_start + len];
            if let Some(object) = balanced_object(body) {
                return Some(object);
            }
        }
    }
    balanced_object(content)
}

fn balanced_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in content[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
