use std::{process, thread, time};

use base64::Engine;

fn now_ns() -> u128 {
    time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos())
}

fn encode<T>(data: T) -> String
where
    T: AsRef<[u8]>,
{
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(data)
}

/// An id unique to the calling process, thread and instant.
///
/// Safe to use as a directory name.
#[must_use]
pub fn time_thread_id() -> String {
    let thread_id = thread::current().id();
    let process_id = process::id();
    let ns = now_ns();

    let id = format!("{ns}-{process_id}-{thread_id:?}");

    encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_path_safe() {
        let id = time_thread_id();

        assert!(!id.is_empty());
        assert!(!id.contains('/'));
        assert!(!id.contains('+'));
    }

    #[test]
    fn consecutive_ids_differ() {
        let a = time_thread_id();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let b = time_thread_id();

        assert_ne!(a, b);
    }
}
