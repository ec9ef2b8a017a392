use std::time::Duration;

use crate::Codec;

pub const DEFAULT_SERVICE_NAME: &str = "add_two_ints";
pub const DEFAULT_SEED: i64 = 41;
pub const DEFAULT_EXCHANGE_COUNT: u32 = 10;
pub const SERVICE_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Settings for one client run, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub service_name: String,
    /// Becomes operand `a` of every request.
    pub seed: i64,
    pub exchange_count: u32,
    pub poll_interval: Duration,
    pub codec: Codec,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_owned(),
            seed: DEFAULT_SEED,
            exchange_count: DEFAULT_EXCHANGE_COUNT,
            poll_interval: SERVICE_POLL_INTERVAL,
            codec: Codec::default(),
        }
    }
}

impl ClientConfig {
    /// Resolves the positional arguments `<program> [service_name] [seed]`.
    /// Anything after the seed is ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter().skip(1);
        let mut config = Self::default();
        if let Some(service_name) = args.next() {
            config.service_name = service_name.as_ref().to_owned();
        }
        if let Some(seed) = args.next() {
            config.seed = parse_seed(seed.as_ref());
        }
        config
    }

    pub fn with_exchange_count(mut self, exchange_count: u32) -> Self {
        self.exchange_count = exchange_count;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn node_name(&self) -> String {
        format!("minimal_client_{}", self.seed)
    }
}

/// Lenient integer parse: ASCII whitespace, optional sign, then leading
/// digits. Input without any digits yields 0 and out-of-range input saturates.
fn parse_seed(raw: &str) -> i64 {
    let trimmed = raw.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}
