//! Static lookup tables for the SolarMax protocol.
//!
//! The metric table maps every code the inverter understands to a
//! description. Status, alarm and type codes are decoded from `SYS`, `SAL`
//! and `TYP` replies respectively.

use serde::Serialize;

/// Metric code → description, sorted by code.
///
/// `SE1` is answered by the inverter without a usable key, so it carries an
/// empty description and is never requested.
pub const METRICS: &[(&str, &str)] = &[
    ("ADR", "Address"),
    ("BDN", "Build number"),
    ("CAC", "Start Ups (?)"),
    ("DDY", "Date day"),
    ("DIN", "Date in integer format with offset 23.12.1510"),
    ("DMT", "Date month"),
    ("DYR", "Date year"),
    ("EC00", "Error Code 0"),
    ("EC01", "Error Code 1"),
    ("EC02", "Error Code 2"),
    ("EC03", "Error Code 3"),
    ("EC04", "Error Code 4"),
    ("EC05", "Error Code 5"),
    ("EC06", "Error Code 6"),
    ("EC07", "Error Code 7"),
    ("EC08", "Error Code 8"),
    ("FDAT", "datetime ?"),
    ("F_AC", "Grid Frequency"),
    ("ID01", "String 1 Current (A)"),
    ("ID02", "String 2 Current (A)"),
    ("ID03", "String 3 Current (A)"),
    ("IDC", "DC Current (A)"),
    ("IL1", "AC Current Phase 1 (A)"),
    ("IL2", "AC Current Phase 2 (A)"),
    ("IL3", "AC Current Phase 3 (A)"),
    ("KDL", "Energy yesterday (Wh)"),
    ("KDY", "Energy today (kWh)"),
    ("KHR", "Operating Hours"),
    ("KLM", "Energy last month (kWh)"),
    ("KLY", "Energy last year (kWh)"),
    ("KMT", "Energy this month (kWh)"),
    ("KT0", "Total Energy(kWh)"),
    ("KYR", "Energy this year (kWh)"),
    ("LAN", "Language"),
    ("MAC", "MAC Address"),
    ("PAC", "AC Power (W)"),
    ("PDC", "DC Power (W)"),
    ("PIN", "Installed Power (W)"),
    ("PRL", "Relative power (%)"),
    ("SAL", "System Alarms"),
    ("SDAT", "datetime ?"),
    ("SE1", ""),
    ("SWV", "Software Version"),
    ("SYS", "System Status"),
    ("THR", "Time hours"),
    ("TKK", "Inverter Temperature (C)"),
    ("TMI", "Time minutes"),
    ("TNF", "Generated Frequency (Hz)"),
    ("TNP", "Grid period duration"),
    ("TYP", "Type"),
    ("UD01", "String 1 Voltage (V)"),
    ("UD02", "String 2 Voltage (V)"),
    ("UD03", "String 3 Voltage (V)"),
    ("UDC", "DC Voltage (V)"),
    ("UL1", "AC Voltage Phase 1 (V)"),
    ("UL2", "AC Voltage Phase 2 (V)"),
    ("UL3", "AC Voltage Phase 3 (V)"),
    ("U_AC", "?"),
    ("U_L1L2", "Phase1 to Phase2 Voltage (V)"),
    ("U_L2L3", "Phase2 to Phase3 Voltage (V)"),
    ("U_L3L1", "Phase3 to Phase1 Voltage (V)"),
];

/// Catalog description for `code`, `None` if the inverter does not know it.
pub fn description(code: &str) -> Option<&'static str> {
    METRICS
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| METRICS[i].1)
}

/// True for codes that may be put into a request.
pub fn is_requestable(code: &str) -> bool {
    description(code).is_some_and(|d| !d.is_empty())
}

pub fn all_codes() -> Vec<&'static str> {
    METRICS.iter().map(|(c, _)| *c).collect()
}

pub fn entries() -> &'static [(&'static str, &'static str)] {
    METRICS
}

// {{{ StatusCode
/// Value of the `SYS` metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StatusCode(pub i64);

impl StatusCode {
    /// Offset subtracted from status codes in the plain output shape.
    pub const BASE: i64 = 20000;

    pub const READ_ERROR: StatusCode = StatusCode(29997);
    pub const SEND_ERROR: StatusCode = StatusCode(29998);
    pub const NOT_REACHABLE: StatusCode = StatusCode(29999);

    pub fn label(&self) -> Option<&'static str> {
        let s = match self.0 {
            20001 => "Running",
            20002 => "Irradiance too low",
            20003 => "Startup",
            20004 => "MPP operation",
            20006 => "Maximum power",
            20007 => "Temperature limitation",
            20008 => "Mains operation",
            20009 => "Idc limitation",
            20010 => "Iac limitation",
            20011 => "Test mode",
            20012 => "Remote controlled",
            20013 => "Restart delay",
            20014 => "External limitation",
            20015 => "Frequency limitation",
            20016 => "Restart limitation",
            20017 => "Booting",
            20018 => "Insufficient boot power",
            20019 => "Insufficient power",
            20021 => "Uninitialized",
            20022 => "Disabled",
            20023 => "Idle",
            20024 => "Powerunit not ready",
            20050 => "Program firmware",
            20101 => "Device error 101",
            20102 => "Device error 102",
            20103 => "Device error 103",
            20104 => "Device error 104",
            20105 => "Insulation fault DC",
            20106 => "Insulation fault DC",
            20107 => "Device error 107",
            20108 => "Device error 108",
            20109 => "Vdc too high",
            20110 => "Device error 110",
            20111 => "Device error 111",
            20112 => "Device error 112",
            20113 => "Device error 113",
            20114 => "Ierr too high",
            20115 => "No mains",
            20116 => "Frequency too high",
            20117 => "Frequency too low",
            20118 => "Mains error",
            20119 => "Vac 10min too high",
            20120 => "Device error 120",
            20121 => "Device error 121",
            20122 => "Vac too high",
            20123 => "Vac too low",
            20124 => "Device error 124",
            20125 => "Device error 125",
            20126 => "Error ext. input 1",
            20127 => "Fault ext. input 2",
            20128 => "Device error 128",
            20129 => "Incorr. rotation dir.",
            20130 => "Device error 130",
            20131 => "Main switch off",
            20132 => "Device error 132",
            20133 => "Device error 133",
            20134 => "Device error 134",
            20135 => "Device error 135",
            20136 => "Device error 136",
            20137 => "Device error 137",
            20138 => "Device error 138",
            20139 => "Device error 139",
            20140 => "Device error 140",
            20141 => "Device error 141",
            20142 => "Device error 142",
            20143 => "Device error 143",
            20144 => "Device error 144",
            20145 => "df/dt too high",
            20146 => "Device error 146",
            20147 => "Device error 147",
            20148 => "Device error 148",
            20150 => "Ierr step too high",
            20151 => "Ierr step too high",
            20153 => "Device error 153",
            20154 => "Shutdown 1",
            20155 => "Shutdown 2",
            20156 => "Device error 156",
            20157 => "Insulation fault DC",
            20158 => "Device error 158",
            20159 => "Device error 159",
            20160 => "Device error 160",
            20161 => "Device error 161",
            20163 => "Device error 163",
            20164 => "Ierr too high",
            20165 => "No mains",
            20166 => "Frequency too high",
            20167 => "Frequency too low",
            20168 => "Mains error",
            20169 => "Vac 10min too high",
            20170 => "Device error 170",
            20171 => "Device error 171",
            20172 => "Vac too high",
            20173 => "Vac too low",
            20174 => "Device error 174",
            20175 => "Device error 175",
            20176 => "Error DC polarity",
            20177 => "Device error 177",
            20178 => "Device error 178",
            20179 => "Device error 179",
            20180 => "Vdc too low",
            20181 => "Blocked external",
            20185 => "Device error 185",
            20186 => "Device error 186",
            20187 => "Device error 187",
            20188 => "Device error 188",
            20189 => "L and N interchanged",
            20190 => "Below-average yield",
            20191 => "Limitation error",
            20198 => "Device error 198",
            20199 => "Device error 199",
            20999 => "Device error 999",

            // local transport failures, see solarmax::inverter
            29997 => "Inverter response read error",
            29998 => "Inverter network send timeout",
            29999 => "Inverter network i/o timeout or not reachable",

            _ => return None,
        };

        Some(s)
    }
}
// }}}

// {{{ AlarmCode
/// Value of the `SAL` metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AlarmCode(pub i64);

impl AlarmCode {
    pub fn label(&self) -> Option<&'static str> {
        let s = match self.0 {
            0 => "No Error",
            1 => "External Fault 1",
            2 => "Insulation fault DC side",
            4 => "Earth fault current too large",
            8 => "Fuse failure midpoint Earth",
            16 => "External alarm 2",
            32 => "Long-term temperature limit",
            64 => "Error AC supply ",
            128 => "External alarm 4",
            256 => "Fan failure",
            512 => "Fuse failure ",
            1024 => "Failure temperature sensor",
            2048 => "Alarm 12",
            4096 => "Alarm 13",
            8192 => "Alarm 14",
            16384 => "Alarm 15",
            32768 => "Alarm 16",
            65536 => "Alarm 17",
            _ => return None,
        };

        Some(s)
    }
}
// }}}

// {{{ TypeCode
/// Value of the `TYP` metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeCode(pub i64);

impl TypeCode {
    pub fn label(&self) -> Option<&'static str> {
        match self.0 {
            20010 => Some("SolarMax 2000S"),
            20020 => Some("SolarMax 3000S"),
            20030 => Some("SolarMax 4200S"),
            20040 => Some("SolarMax 6000S"),
            _ => None,
        }
    }
}
// }}}
