//! Line-oriented prompting over async streams.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Reads answers from `R` and writes prompts and output to `W`.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Write `text` followed by a newline.
    pub async fn say(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Show `label` and read one trimmed line.
    ///
    /// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
    pub async fn ask(&mut self, label: &str) -> io::Result<String> {
        self.writer.write_all(label.as_bytes()).await?;
        self.writer.write_all(b" ").await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer, printing each rejection.
    pub async fn ask_with<T, F>(&mut self, label: &str, parse: F) -> io::Result<T>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        loop {
            let answer = self.ask(label).await?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(msg) => self.say(&msg).await?,
            }
        }
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

/// True when `e` means the user closed the input stream.
pub fn is_eof(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::UnexpectedEof
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: &Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(p.writer()).into_owned()
    }

    #[tokio::test]
    async fn test_ask_trims_answer() {
        let mut p = prompter("  hello \n");
        assert_eq!(p.ask("Name:").await.unwrap(), "hello");
        assert_eq!(output(&p), "Name: ");
    }

    #[tokio::test]
    async fn test_ask_eof() {
        let mut p = prompter("");
        let err = p.ask("Name:").await.unwrap_err();
        assert!(is_eof(&err));
    }

    #[tokio::test]
    async fn test_ask_with_reprompts() {
        let mut p = prompter("abc\n12\n");
        let n: u32 = p
            .ask_with("Number:", |s| s.parse().map_err(|_| "Not a number".to_string()))
            .await
            .unwrap();
        assert_eq!(n, 12);
        assert_eq!(output(&p), "Number: Not a number\nNumber: ");
    }
}
