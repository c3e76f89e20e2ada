use romaneio_protocol::{RecordId, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// ASCII-ordered, so generated ids sort by creation time.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIME_CHARS: usize = 8;
const SEQ_CHARS: usize = 12;

/// Generates 20-character push-style record ids: 8 characters of millisecond
/// timestamp followed by 12 characters of a process-wide sequence.
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    seq: AtomicU64,
}

impl PushIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> Result<RecordId> {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.next_id_at(now_ms)
    }

    pub fn next_id_at(&self, now_ms: u64) -> Result<RecordId> {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let mut out = String::with_capacity(TIME_CHARS + SEQ_CHARS);
        encode(now_ms, TIME_CHARS, &mut out);
        encode(seq, SEQ_CHARS, &mut out);
        RecordId::new(out)
    }
}

fn encode(mut value: u64, width: usize, out: &mut String) {
    let mut buf = vec![PUSH_CHARS[0]; width];
    for slot in buf.iter_mut().rev() {
        *slot = PUSH_CHARS[(value % 64) as usize];
        value /= 64;
    }
    out.extend(buf.into_iter().map(char::from));
}
