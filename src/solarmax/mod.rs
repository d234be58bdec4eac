//! SolarMax ASCII protocol: request encoding, reply decoding and the TCP
//! exchange between them.

pub mod catalog;       // Metric, status, alarm and type tables
pub mod inverter;      // TCP transport and synthetic failure replies
pub mod metric;        // Metric codes, scaling and labels
pub mod packet;        // Request and reply frames
pub mod reply_decoder; // Frame reassembly from the byte stream
