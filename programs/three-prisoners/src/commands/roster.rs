//! Roster listing

use match_logic::Roster;
use crate::report::RosterReport;

pub fn run(roster: &Roster) -> RosterReport {
    RosterReport::new(roster)
}
