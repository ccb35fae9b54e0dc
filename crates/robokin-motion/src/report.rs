//! Plain-text dump of the live kinematics configuration.
//!
//! The layout follows the firmware status dump line for line with two
//! differences: the header reads [`REPORT_HEADER`] instead of
//! `=== M669 K13 current config ===`, and `cache used` counts `ω̂²` as nine
//! elements per rotary axis where the firmware reserves twelve. A CoreXY
//! five-axis chain therefore reports 74 where the firmware prints 80.

use std::fmt;

use robokin_core::CACHE_CAPACITY;
use robokin_ik::{AxisChain, Transform, Vec3};

/// First line of every configuration report.
pub const REPORT_HEADER: &str = "=== robot kinematics configuration ===";

const AB_SIGN_LEGEND: &str =
    "(A/B angle preference: 0 take >=0, 1 take <= 0, 2 don't change calculation)";

/// Render the full configuration of `chain`.
pub fn configuration_report(chain: &AxisChain) -> String {
    ConfigurationReport(chain).to_string()
}

/// [`fmt::Display`] view of a chain configuration.
pub struct ConfigurationReport<'a>(pub &'a AxisChain);

impl fmt::Display for ConfigurationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = self.0;
        let descriptor = chain.descriptor();
        let types: String = chain.records().iter().map(|r| r.kind.as_char()).collect();

        writeln!(f, "{REPORT_HEADER}")?;
        writeln!(
            f,
            "numOfAxes {} axisTypes {} chain {} (normal {} special {})",
            chain.num_axes(),
            types,
            descriptor.text(),
            descriptor.normal_letters(),
            descriptor.special_letters(),
        )?;

        for (slot, record) in chain.records().iter().enumerate() {
            let letter = chain.letter_at(slot).map_or('?', |l| l.as_char());
            let o = record.screw.omega;
            let q = record.screw.point;
            let l = record.limits;
            writeln!(
                f,
                "axis {letter} ori: {:.2} {:.2} {:.2} point: {:.2} {:.2} {:.2} \
                 angles min/max/home: {:.2} {:.2} {:.2}",
                o.x, o.y, o.z, q.x, q.y, q.z, l.min, l.max, l.home,
            )?;
        }

        writeln!(f, "Screw values:")?;
        write!(f, "   reference angles/positions:")?;
        for record in chain.records() {
            write!(f, " {:.2}", record.reference)?;
        }
        writeln!(f)?;
        write_frame(f, "endpoint", chain.endpoint(), 2)?;
        write_frame(f, "inverse endpoint", chain.endpoint_inverse(), 5)?;

        let special = chain.special();
        match special.method {
            Some(method) => {
                writeln!(f, "special kinematics set: {method}")?;
                if method.has_workmodes() {
                    writeln!(f, "   workmode: {}", special.workmode)?;
                }
            }
            None => writeln!(f, "special kinematics set: none")?,
        }
        if chain.num_axes() == 5 {
            writeln!(f, "abSign: {}  {AB_SIGN_LEGEND}", special.ab_sign.code())?;
        }
        writeln!(f, "cache used: {} maximum: {CACHE_CAPACITY}", chain.layout().used())
    }
}

fn write_frame(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    frame: &Transform,
    precision: usize,
) -> fmt::Result {
    let frame = frame.without_near_zero();
    for (c, name) in ["X", "Y", "Z"].into_iter().enumerate() {
        write!(f, "   {label} axis {name}:")?;
        write_vec(f, frame.rot.column(c), precision)?;
    }
    write!(f, "   {label} point:")?;
    write_vec(f, frame.trans, precision)
}

fn write_vec(f: &mut fmt::Formatter<'_>, v: Vec3, precision: usize) -> fmt::Result {
    writeln!(f, " {:.p$} {:.p$} {:.p$}", v.x, v.y, v.z, p = precision)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use robokin_test_utils::{corexy5ac_config, corexy5bc_config};

    fn chain_from(config: &robokin_core::RobotConfig) -> AxisChain {
        let mut chain = AxisChain::new();
        chain.apply_config(config).unwrap();
        chain
    }

    #[test]
    fn report_layout_for_ac() {
        let report = configuration_report(&chain_from(&corexy5ac_config()));
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], REPORT_HEADER);
        assert_eq!(
            lines[1],
            "numOfAxes 5 axisTypes RRPPP chain CAZ_corexy(XY) (normal CAZ.. special XY)"
        );
        assert_eq!(
            lines[2],
            "axis C ori: 0.00 0.00 1.00 point: 10.00 5.00 0.00 \
             angles min/max/home: -360.00 360.00 0.00"
        );
        assert_eq!(lines[7], "Screw values:");
        assert_eq!(lines[8], "   reference angles/positions: 0.00 0.00 0.00 0.00 0.00");
        assert_eq!(lines[9], "   endpoint axis X: 1.00 0.00 0.00");
        assert_eq!(lines[12], "   endpoint point: 0.00 0.00 0.00");
        assert_eq!(lines[13], "   inverse endpoint axis X: 1.00000 0.00000 0.00000");
        assert!(report.contains("special kinematics set: CoreXY\n"));
        assert!(!report.contains("workmode"));
        assert!(report.contains("abSign: 0  (A/B angle preference"));
        assert_eq!(*lines.last().unwrap(), "cache used: 74 maximum: 200");
    }

    #[test]
    fn report_shows_endpoint_and_sign() {
        let mut config = corexy5bc_config();
        config.endpoint = Some([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -30.0]);
        config.ab_sign = robokin_core::AbSign::DontCare;
        let report = configuration_report(&chain_from(&config));
        assert!(report.contains("axis B ori: 0.00 1.00 0.00 point: 0.00 0.00 40.00"));
        assert!(report.contains("   endpoint point: 0.00 0.00 -30.00\n"));
        assert!(report.contains("   inverse endpoint point: 0.00000 0.00000 30.00000\n"));
        assert!(report.contains("abSign: 2"));
    }

    #[test]
    fn unconfigured_chain_reports_empty() {
        let report = configuration_report(&AxisChain::new());
        assert!(report.contains("numOfAxes 0 axisTypes  chain "));
        assert!(report.contains("special kinematics set: none"));
        assert!(!report.contains("abSign"));
        assert!(report.ends_with("cache used: 0 maximum: 200\n"));
    }
}
