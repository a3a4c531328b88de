//! DaZeus wire format: every JSON message is preceded by its length in ASCII digits.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};

/// Anything longer is not something the core would send us.
const MAX_MESSAGE_LEN: usize = 1 << 20;

/// Reads the next message, or `None` when the peer closed the connection between messages.
pub async fn read_message<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<Value>> {
    let mut length: usize = 0;
    let mut seen_digit = false;
    let first = loop {
        let byte = {
            let buf = reader.fill_buf().await?;
            let Some(&byte) = buf.first() else {
                if seen_digit {
                    return Err(Error::Protocol("connection closed inside a message".into()));
                }
                return Ok(None);
            };
            byte
        };
        reader.consume(1);
        match byte {
            b'0'..=b'9' => {
                seen_digit = true;
                length = length
                    .checked_mul(10)
                    .and_then(|l| l.checked_add(usize::from(byte - b'0')))
                    .ok_or_else(|| Error::Protocol("message length overflows".into()))?;
            }
            b if b.is_ascii_whitespace() && !seen_digit => {}
            b if seen_digit => break b,
            b => {
                return Err(Error::Protocol(format!(
                    "expected a message length, got byte {b:#04x}"
                )))
            }
        }
    };
    if length == 0 {
        return Err(Error::Protocol("empty message".into()));
    }
    if length > MAX_MESSAGE_LEN {
        return Err(Error::Protocol(format!(
            "message of {length} bytes exceeds the {MAX_MESSAGE_LEN} byte limit"
        )));
    }

    let mut body = vec![0; length];
    body[0] = first;
    reader.read_exact(&mut body[1..]).await?;
    Ok(Some(serde_json::from_slice(&body)?))
}

pub async fn write_message<W: AsyncWrite + Unpin, T: Serialize>(writer: &mut W, message: &T) -> Result<()> {
    let json = serde_json::to_string(message)?;
    log::trace!("-> {json}");
    writer.write_all(format!("{}{json}", json.len()).as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
