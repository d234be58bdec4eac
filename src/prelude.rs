pub use anyhow::{anyhow, bail, Result};
pub use log::{debug, error, info, trace, warn};

pub use crate::config::{self, Config, OutputShape, ReadMode};
pub use crate::error::{DecodeError, TransportError};
pub use crate::options::{Mode, Options};
pub use crate::solarmax::catalog::{self, AlarmCode, StatusCode, TypeCode};
pub use crate::solarmax::inverter::{TcpTransport, Transport};
pub use crate::solarmax::metric::{Metric, MetricCode, MetricValue, Scale};
pub use crate::solarmax::packet::{InverterId, Reply, Request};
