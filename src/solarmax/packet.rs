use crate::prelude::*;
use crate::solarmax::metric::{Metric, MetricCode, MetricValue};

use std::collections::BTreeMap;

/// Query type sent in every request body (`64` on the wire).
pub const QUERY_TYPE: u8 = 100;

/// Address this client uses as the frame source.
pub const SOURCE_ADDRESS: &str = "FB";

/// Code used to fill a request up to a multiple of [`CODE_BLOCK`].
pub const PAD_CODE: &str = "SYS";

pub const CODE_BLOCK: usize = 4;

// header and trailer bytes the length field accounts for beyond the body
const LENGTH_OFFSET: usize = 9 + 5;

// {{{ InverterId
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct InverterId(pub u8);

impl std::fmt::Display for InverterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
} // }}}

// {{{ Request
/// A metric query addressed to one inverter.
///
/// The code list always holds a multiple of four entries; unknown codes are
/// dropped and the remainder padded with `SYS`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    inverter: InverterId,
    codes: Vec<MetricCode>,
}

impl Request {
    pub fn new<S: AsRef<str>>(requested: &[S], inverter: InverterId) -> Self {
        let mut codes: Vec<MetricCode> = Vec::with_capacity(requested.len() + CODE_BLOCK);

        for code in requested.iter().map(|c| MetricCode::new(c.as_ref())) {
            if code.is_requestable() {
                codes.push(code);
            } else {
                warn!("unknown metric: <{}>", code);
            }
        }

        let padded = codes.len().div_ceil(CODE_BLOCK).max(1) * CODE_BLOCK;
        codes.resize(padded, MetricCode::new(PAD_CODE));

        Self { inverter, codes }
    }

    /// Builds a request from a comma separated list such as `"PAC,SYS"`.
    pub fn from_list(list: &str, inverter: InverterId) -> Self {
        let requested: Vec<&str> = list.split(',').collect();
        Self::new(&requested, inverter)
    }

    pub fn inverter(&self) -> InverterId {
        self.inverter
    }

    pub fn codes(&self) -> &[MetricCode] {
        &self.codes
    }

    /// Wire representation, e.g. `{FB;01;22|64:PAC;SYS;SYS;SYS|07E1}`.
    pub fn to_frame(&self) -> String {
        let joined = self
            .codes
            .iter()
            .map(MetricCode::as_str)
            .collect::<Vec<_>>()
            .join(";");

        let body = format!("|{:02x}:{}|", QUERY_TYPE, joined);
        let header = format!(
            "{};{:02x};{:02x}",
            SOURCE_ADDRESS,
            self.inverter.0,
            LENGTH_OFFSET + body.len()
        );

        // the checksum covers the lowercase hex fields, uppercasing comes last
        let data = header + &body;
        let checksum = Self::checksum(&data);

        format!("{{{}{:04x}}}", data, checksum).to_uppercase()
    }

    /// Plain byte sum, not truncated to 16 bits.
    pub fn checksum(data: &str) -> u64 {
        data.bytes().map(u64::from).sum()
    }
} // }}}

// {{{ Reply
/// A decoded inverter reply.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub inverter: i64,
    pub metrics: BTreeMap<MetricCode, Metric>,
}

impl Reply {
    /// Parses `{<src>;<dst>;<len>|<qtype>:<k>=<v>[,..];..|<checksum>}`.
    ///
    /// Decoding stops as soon as the next key repeats the current one, which
    /// marks the `SYS` padding of the request.
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        let mut blocks = raw.split('|');
        let header = blocks.next().unwrap_or_default();

        let inverter_hex = header
            .split(';')
            .next()
            .and_then(|field| field.split('{').nth(1))
            .ok_or_else(|| DecodeError::MalformedHeader(format!("no inverter id in {:?}", header)))?;
        let inverter = i64::from_str_radix(inverter_hex, 16).map_err(|err| {
            DecodeError::MalformedHeader(format!("inverter id {:?}: {}", inverter_hex, err))
        })?;
        debug!("inverter id: {:02}", inverter);

        let data = blocks
            .next()
            .ok_or_else(|| DecodeError::MalformedBody(format!("no data block in {:?}", raw)))?;
        let pairs = data
            .split(':')
            .nth(1)
            .ok_or_else(|| DecodeError::MalformedBody(format!("no query type separator in {:?}", data)))?;

        let tokens: Vec<&str> = pairs.split(';').collect();
        let mut metrics = BTreeMap::new();

        for (i, token) in tokens.iter().enumerate() {
            let (key, value) = token.split_once('=').ok_or_else(|| DecodeError::MalformedValue {
                key: token.to_string(),
                value: String::new(),
            })?;

            // anything after the first comma is not part of the value
            let hex = value.split(',').next().unwrap_or_default();
            let raw_value = i64::from_str_radix(hex, 16).map_err(|_| DecodeError::MalformedValue {
                key: key.to_string(),
                value: value.to_string(),
            })?;

            let code = MetricCode::new(key);
            let metric = Metric::new(code.clone(), raw_value);
            trace!(
                "{}. {}-{} value: {:?}",
                i + 1,
                code,
                code.description().unwrap_or_default(),
                metric.value
            );
            metrics.insert(code.clone(), metric);

            let next_key = tokens
                .get(i + 1)
                .and_then(|next| next.split('=').next())
                .map(MetricCode::new);
            if next_key.as_ref() == Some(&code) {
                break;
            }
        }

        Ok(Self { inverter, metrics })
    }

    pub fn get(&self, code: &str) -> Option<&Metric> {
        self.metrics.get(code)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// System status carried by the reply, if it contains `SYS`.
    pub fn status(&self) -> Option<StatusCode> {
        self.get("SYS").map(|m| StatusCode(m.raw))
    }

    /// Renders the metrics as a JSON object keyed by metric code.
    pub fn to_json(&self, shape: OutputShape) -> Result<String> {
        let json = match shape {
            OutputShape::Detailed => serde_json::to_string(&self.metrics)?,
            OutputShape::Plain => {
                let plain: BTreeMap<&str, MetricValue> = self
                    .metrics
                    .iter()
                    .map(|(code, metric)| (code.as_str(), metric.plain_value()))
                    .collect();
                serde_json::to_string(&plain)?
            }
        };

        Ok(json)
    }
} // }}}
