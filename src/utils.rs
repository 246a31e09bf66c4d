use rand::Rng;

/// Format a byte count the way the compression report expects it: sizes
/// above one kilobyte are shown in KB with two decimals, smaller sizes in
/// plain bytes.
pub fn format_size(bytes: u64) -> String {
    if bytes > 1024 {
        format!("{:.2}KB", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`, used to stamp report sections.
pub fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// A random IPv4 address for the `X-Forwarded-For` header sent with uploads.
pub fn random_ip() -> String {
    let mut rng = rand::thread_rng();
    (0..4)
        .map(|_| rng.gen_range(0..=255u8).to_string())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(1024), "1024B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(format_size(1025), "1.00KB");
        assert_eq!(format_size(1536), "1.50KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5120.00KB");
    }

    #[test]
    fn test_now_timestamp_shape() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
    }

    #[test]
    fn test_random_ip_is_valid() {
        for _ in 0..32 {
            let ip = random_ip();
            let octets: Vec<&str> = ip.split('.').collect();
            assert_eq!(octets.len(), 4);
            for octet in octets {
                octet.parse::<u8>().unwrap();
            }
        }
    }
}
