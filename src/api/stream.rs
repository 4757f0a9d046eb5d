//! Chunked event-stream decoding shared by schema indexing and query runs.
//!
//! The backend frames both streams identically: `data: <json>` records
//! separated by a blank line. `FrameDecoder` turns arbitrarily-split byte
//! chunks back into complete frames; `decode_stream` drives it over an HTTP
//! body while racing an abort signal.

use crate::api::event::{StreamEvent, WireEvent};
use crate::error::{Error, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt as _};
use tokio::sync::watch;
use tracing::{debug, warn};

const DATA_PREFIX: &str = "data: ";

/// Reassembles `data: <json>\n\n` frames from raw byte chunks.
///
/// Buffering happens in bytes, not text, so a chunk boundary that splits a
/// multi-byte UTF-8 sequence (or the frame delimiter itself) can never
/// corrupt a frame: text decoding only happens once a frame is complete.
///
/// Malformed frames are dropped rather than aborting the stream; one bad
/// event must not kill an otherwise-healthy stream. Each drop is counted
/// and logged, so dirty streams stay observable.
#[derive(Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    dropped: u64,
}

impl FrameDecoder {
    /// Feed one network chunk; returns every event completed by it, in
    /// frame order.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buf.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(idx) = find_delimiter(&self.buf) {
            let frame: Vec<u8> = self.buf[..idx].to_vec();
            self.buf.drain(..idx + 2);
            match parse_frame(&frame) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => {
                    self.dropped += 1;
                    warn!(%err, "dropped malformed stream frame");
                }
            }
        }
        events
    }

    /// Number of frames dropped because their payload failed to parse.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped
    }
}

/// Byte offset of the next `\n\n` frame delimiter, if a full frame is
/// buffered.
fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\n\n")
}

/// Parse one complete frame. `Ok(None)` for frames without the `data: `
/// prefix (heartbeats, empty frames), which are ignored without counting.
fn parse_frame(bytes: &[u8]) -> std::result::Result<Option<StreamEvent>, serde_json::Error> {
    let text = String::from_utf8_lossy(bytes);
    let Some(payload) = text.strip_prefix(DATA_PREFIX) else {
        return Ok(None);
    };
    let wire: WireEvent = serde_json::from_str(payload)?;
    Ok(Some(wire.into()))
}

/// Handle used to request cancellation of an in-flight stream.
#[derive(Clone)]
pub struct AbortHandle {
    tx: watch::Sender<bool>,
}

impl AbortHandle {
    /// Requests cancellation. The decode loop stops promptly and settles
    /// with `Error::Cancelled`; no further events are delivered.
    pub fn abort(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiving side of an abort pair, passed into `decode_stream`.
pub type AbortSignal = watch::Receiver<bool>;

/// Creates a linked abort handle/signal pair.
pub fn abort_pair() -> (AbortHandle, AbortSignal) {
    let (tx, rx) = watch::channel(false);
    (AbortHandle { tx }, rx)
}

/// Drives `FrameDecoder` over a chunked byte source, invoking `on_event`
/// once per fully-parsed event, strictly in frame order, until the source
/// ends, errors, or `cancel` fires.
///
/// The decoder owns no state beyond this call: the buffer is discarded when
/// the function returns, and a partial trailing frame is never delivered.
/// Callers running one stream per UI surface are expected to abort the
/// previous call before starting the next; no exclusivity is enforced here.
pub async fn decode_stream<S, E, F>(mut bytes: S, mut on_event: F, mut cancel: AbortSignal) -> Result
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
    E: Into<Error>,
    F: FnMut(StreamEvent),
{
    let mut decoder = FrameDecoder::default();
    let mut cancel_open = true;
    loop {
        tokio::select! {
            changed = cancel.changed(), if cancel_open => {
                match changed {
                    Ok(()) => {
                        if *cancel.borrow() {
                            debug!("stream cancelled by caller");
                            return Err(Error::Cancelled);
                        }
                    }
                    // Every abort handle is gone; only the source can end us now.
                    Err(_) => cancel_open = false,
                }
            }
            next = bytes.next() => {
                match next {
                    Some(Ok(chunk)) => {
                        for event in decoder.push_chunk(&chunk) {
                            on_event(event);
                        }
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => {
                        if decoder.dropped_frames() > 0 {
                            warn!(dropped = decoder.dropped_frames(), "stream ended with dropped frames");
                        }
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{StreamExt as _, stream};
    use serde_json::json;
    use std::time::Duration;

    const QUERY_STREAM: &[u8] = b"data: {\"type\":\"sql_chunk\",\"chunk\":\"SELECT \"}\n\n\
        data: {\"type\":\"sql_chunk\",\"chunk\":\"1;\"}\n\n\
        data: {\"type\":\"results\",\"rows\":[[1]],\"columns\":[\"x\"],\"row_count\":1,\"exec_time_ms\":5}\n\n";

    #[test]
    fn whole_input_decodes_the_example_stream() {
        crate::testing::common_init();
        let mut decoder = FrameDecoder::default();
        let events = decoder.push_chunk(QUERY_STREAM);
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            StreamEvent::SqlChunk {
                chunk: "SELECT ".into()
            }
        );
        assert_eq!(events[1], StreamEvent::SqlChunk { chunk: "1;".into() });
        let StreamEvent::Results(rs) = &events[2] else {
            panic!("expected results event");
        };
        assert_eq!(rs.get(0, "x"), Some(&json!(1)));
        assert_eq!(rs.row_count, 1);
        assert_eq!(rs.exec_time_ms, 5);
    }

    #[test]
    fn arbitrary_chunk_splits_yield_the_same_events() {
        crate::testing::common_init();
        // A multi-byte character in the payload makes mid-character splits
        // part of the sweep; every split point of the input is exercised,
        // including ones inside the \n\n delimiter.
        let input = "data: {\"type\":\"status\",\"message\":\"caf\u{00e9} ready\"}\n\n\
            data: {\"type\":\"progress\",\"current\":1,\"total\":2}\n\n"
            .as_bytes();
        let mut whole = FrameDecoder::default();
        let expected = whole.push_chunk(input);
        assert_eq!(expected.len(), 2);

        for split in 0..=input.len() {
            let mut decoder = FrameDecoder::default();
            let mut events = decoder.push_chunk(&input[..split]);
            events.extend(decoder.push_chunk(&input[split..]));
            assert_eq!(events, expected, "split at byte {split} diverged");
        }
    }

    #[test]
    fn malformed_frame_is_dropped_and_counted() {
        crate::testing::common_init();
        let input = b"data: {\"type\":\"status\",\"message\":\"a\"}\n\n\
            data: {not json}\n\n\
            data: {\"type\":\"status\",\"message\":\"b\"}\n\n";
        let mut decoder = FrameDecoder::default();
        let events = decoder.push_chunk(input);
        assert_eq!(
            events,
            vec![
                StreamEvent::Status {
                    message: "a".into()
                },
                StreamEvent::Status {
                    message: "b".into()
                },
            ]
        );
        assert_eq!(decoder.dropped_frames(), 1);
    }

    #[test]
    fn unknown_event_type_counts_as_malformed() {
        let input = b"data: {\"type\":\"meta\",\"x\":1}\n\n";
        let mut decoder = FrameDecoder::default();
        assert!(decoder.push_chunk(input).is_empty());
        assert_eq!(decoder.dropped_frames(), 1);
    }

    #[test]
    fn frames_without_data_prefix_are_ignored_silently() {
        let input = b": heartbeat\n\n\n\ndata: {\"type\":\"done\",\"table_count\":4}\n\n";
        let mut decoder = FrameDecoder::default();
        let events = decoder.push_chunk(input);
        assert_eq!(events, vec![StreamEvent::Done { table_count: 4 }]);
        assert_eq!(decoder.dropped_frames(), 0);
    }

    #[test]
    fn trailing_partial_frame_is_retained_not_delivered() {
        let mut decoder = FrameDecoder::default();
        let events = decoder.push_chunk(b"data: {\"type\":\"status\",\"message\":\"x\"}");
        assert!(events.is_empty());
        let events = decoder.push_chunk(b"\n\n");
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn decode_stream_delivers_events_in_order() {
        crate::testing::common_init();
        let chunks: Vec<std::result::Result<Bytes, Error>> = QUERY_STREAM
            .chunks(7)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        let (_handle, signal) = abort_pair();
        let mut events = Vec::new();
        decode_stream(stream::iter(chunks), |e| events.push(e), signal)
            .await
            .expect("stream should decode");
        assert_eq!(events.len(), 3);
        assert!(events[2].is_terminal());
    }

    #[tokio::test]
    async fn cancellation_stops_the_stream_without_further_events() {
        crate::testing::common_init();
        let first = Bytes::from_static(b"data: {\"type\":\"sql_chunk\",\"chunk\":\"SELECT \"}\n\n");
        let bytes = stream::iter(vec![Ok::<_, Error>(first)]).chain(stream::pending());
        let (handle, signal) = abort_pair();
        let aborter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.abort();
        });

        let mut events = Vec::new();
        let outcome = decode_stream(Box::pin(bytes), |e| events.push(e), signal).await;
        aborter.await.expect("abort task");

        assert!(matches!(outcome, Err(Error::Cancelled)));
        assert_eq!(events.len(), 1, "only the pre-abort chunk is delivered");
    }

    #[tokio::test]
    async fn dropped_abort_handle_does_not_end_the_stream() {
        let chunks: Vec<std::result::Result<Bytes, Error>> = vec![Ok(Bytes::from_static(
            b"data: {\"type\":\"done\",\"table_count\":1}\n\n",
        ))];
        let (handle, signal) = abort_pair();
        drop(handle);
        let mut events = Vec::new();
        decode_stream(stream::iter(chunks), |e| events.push(e), signal)
            .await
            .expect("stream should finish normally");
        assert_eq!(events, vec![StreamEvent::Done { table_count: 1 }]);
    }
}
