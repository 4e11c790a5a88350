//! The PATH system: 13 stations on 4 lines.

use super::{Topology, TopologyBuilder};

/// Build the PATH topology.
///
/// Only the hubs are declared as transfer points. Exchange Place and the
/// 6th Avenue stations are shared by two lines but are not offered as
/// transfers, so Newark to Hoboken changes at World Trade Center.
pub fn path_topology() -> Topology {
    let topology = TopologyBuilder::new()
        .station("NWK", "Newark", 40.7347, -74.1644)
        .station("HAR", "Harrison", 40.7393, -74.1558)
        .station("JSQ", "Journal Square", 40.7331, -74.0628)
        .station("GRV", "Grove Street", 40.7196, -74.0431)
        .station("EXP", "Exchange Place", 40.7163, -74.0328)
        .station("WTC", "World Trade Center", 40.7118, -74.0101)
        .station("NEW", "Newport", 40.7270, -74.0338)
        .station("HOB", "Hoboken", 40.7357, -74.0290)
        .station("CHR", "Christopher Street", 40.7330, -74.0071)
        .station("09S", "9th Street", 40.7342, -73.9988)
        .station("14S", "14th Street", 40.7374, -73.9969)
        .station("23S", "23rd Street", 40.7429, -73.9929)
        .station("33S", "33rd Street", 40.7490, -73.9882)
        .line(
            "NWK-WTC",
            "Newark - World Trade Center",
            "#D93A30",
            10.0,
            &["NWK", "HAR", "JSQ", "GRV", "EXP", "WTC"],
        )
        .line(
            "HOB-WTC",
            "Hoboken - World Trade Center",
            "#65C100",
            10.0,
            &["HOB", "NEW", "EXP", "WTC"],
        )
        .line(
            "JSQ-33S",
            "Journal Square - 33rd Street",
            "#FF9900",
            10.0,
            &["JSQ", "GRV", "NEW", "CHR", "09S", "14S", "23S", "33S"],
        )
        .line(
            "HOB-33S",
            "Hoboken - 33rd Street",
            "#4D92FB",
            10.0,
            &["HOB", "CHR", "09S", "14S", "23S", "33S"],
        )
        .transfer("JSQ")
        .transfer("GRV")
        .transfer("NEW")
        .transfer("HOB")
        .transfer("WTC")
        .transfer("33S");

    match topology.build() {
        Ok(t) => t,
        // The data above is fixed; a failure here is a programming error.
        Err(e) => panic!("built-in PATH topology is invalid: {e}"),
    }
}
