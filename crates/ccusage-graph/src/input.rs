use ccusage_graph_core::{GraphError, Result};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Reads `reader` to completion.
///
/// Only the first read is raced against `window`: once a byte (or EOF) has
/// arrived the rest is read without a deadline.
pub async fn read_input<R>(mut reader: R, window: Duration) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; 8 * 1024];

    let first = tokio::select! {
        read = reader.read(&mut chunk) => read?,
        _ = tokio::time::sleep(window) => {
            return Err(GraphError::InputTimeout { waited: window });
        }
    };

    let mut buffer = chunk[..first].to_vec();
    if first > 0 {
        reader.read_to_end(&mut buffer).await?;
    }

    String::from_utf8(buffer)
        .map_err(|e| GraphError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_reads_until_eof() {
        let (mut tx, rx) = tokio::io::duplex(1024);
        tokio::spawn(async move {
            tx.write_all(br#"{"usage": [{"date": "2024-01-01", "cost": 1.0}]}"#)
                .await
                .unwrap();
        });

        let input = read_input(rx, Duration::from_secs(5)).await.unwrap();
        assert_eq!(input, r#"{"usage": [{"date": "2024-01-01", "cost": 1.0}]}"#);
    }

    #[tokio::test]
    async fn test_times_out_without_data() {
        let (_tx, rx) = tokio::io::duplex(1024);

        let err = read_input(rx, Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, GraphError::InputTimeout { .. }));
    }

    #[tokio::test]
    async fn test_slow_tail_is_not_cut_off() {
        let (mut tx, rx) = tokio::io::duplex(1024);
        tokio::spawn(async move {
            tx.write_all(b"{\"daily\":").await.unwrap();
            tokio::time::sleep(Duration::from_millis(150)).await;
            tx.write_all(b" []}").await.unwrap();
        });

        let input = read_input(rx, Duration::from_millis(50)).await.unwrap();
        assert_eq!(input, "{\"daily\": []}");
    }

    #[tokio::test]
    async fn test_empty_input_returns_empty_string() {
        let input = read_input(tokio::io::empty(), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(input.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_an_io_error() {
        let bytes: &[u8] = &[0xff, 0xfe, 0xfd];
        let err = read_input(bytes, Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
