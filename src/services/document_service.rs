/// Column width the body is wrapped at before rendering.
const WRAP_COLUMNS: usize = 115;

/// Formatting transform from (title, body) to a downloadable blob. Kept
/// behind a trait so the plan manager stays independent of the document
/// format.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, title: &str, body: &str) -> Vec<u8>;
}

/// Plain UTF-8 document: title banner followed by the wrapped body.
pub struct TextDocumentRenderer;

impl DocumentRenderer for TextDocumentRenderer {
    fn render(&self, title: &str, body: &str) -> Vec<u8> {
        let mut document = String::new();
        document.push_str(title);
        document.push('\n');
        document.push_str(&"=".repeat(title.chars().count()));
        document.push_str("\n\n");
        for line in wrap_text(body, WRAP_COLUMNS) {
            document.push_str(&line);
            document.push('\n');
        }
        document.into_bytes()
    }
}

/// Word-wrap every input line at `columns` characters. Blank input lines are
/// preserved; words longer than the column width are split.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    text.lines().flat_map(|line| wrap_line(line, columns)).collect()
}

fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= columns {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if current_len > 0 {
            wrapped.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= columns {
            current.push_str(word);
            current_len = word_len;
        } else {
            // split an oversized word into column-width chunks
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(columns) {
                let piece: String = chunk.iter().collect();
                if chunk.len() == columns {
                    wrapped.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
        }
    }

    if current_len > 0 {
        wrapped.push(current);
    }
    if wrapped.is_empty() {
        wrapped.push(String::new());
    }
    wrapped
}
