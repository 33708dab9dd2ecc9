//! Minimal reader for the text registry hives kept in a prefix
//!
//! Only what the prefix metadata needs: the `#arch=` header and string
//! values of named sections. Binary and multi-line hex values are kept as raw
//! text.

/// One `[Key\\Path] timestamp` block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegSection {
    /// Key path with escapes removed (`Software\Wine\DllOverrides`)
    pub key: String,
    pub values: Vec<(String, String)>,
}

impl RegSection {
    /// Value lookup; registry names are case-insensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

/// Architecture from the `#arch=win32|win64` header line.
pub fn parse_arch(text: &str) -> Option<String> {
    text.lines()
        .take_while(|line| !line.starts_with('['))
        .find_map(|line| line.trim().strip_prefix("#arch="))
        .map(|arch| arch.trim().to_string())
        .filter(|arch| !arch.is_empty())
}

/// Every section of a hive, in file order.
pub fn parse_sections(text: &str) -> Vec<RegSection> {
    let mut sections: Vec<RegSection> = Vec::new();

    for line in text.lines() {
        if let Some(header) = line.strip_prefix('[') {
            let Some(end) = header.rfind(']') else {
                continue;
            };
            sections.push(RegSection {
                key: unescape(&header[..end]),
                values: Vec::new(),
            });
            continue;
        }

        let Some(current) = sections.last_mut() else {
            continue;
        };
        if let Some((name, value)) = parse_value_line(line) {
            current.values.push((name, value));
        }
    }

    sections
}

/// `"name"="value"`, `@="value"` or `"name"=dword:0000001`.
fn parse_value_line(line: &str) -> Option<(String, String)> {
    let (name, rest) = if let Some(rest) = line.strip_prefix('@') {
        ("@".to_string(), rest)
    } else {
        parse_quoted(line)?
    };
    let raw = rest.strip_prefix('=')?;
    let value = match parse_quoted(raw) {
        Some((value, _)) => value,
        None => raw.trim_end_matches('\\').to_string(),
    };
    Some((name, value))
}

/// Leading quoted string and whatever follows the closing quote.
fn parse_quoted(s: &str) -> Option<(String, &str)> {
    let body = s.strip_prefix('"')?;
    let mut out = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, escaped)) => out.push(escaped),
                None => return None,
            },
            '"' => return Some((out, &body[i + 1..])),
            _ => out.push(c),
        }
    }
    None
}

fn unescape(s: &str) -> String {
    s.replace("\\\\", "\\")
}
