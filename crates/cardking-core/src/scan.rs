// Card image capture placeholder. It performs no I/O of any kind.

use crate::display::DisplayPort;

pub const SCAN_PLACEHOLDER_STATUS: &str =
    "Scan is not implemented in this release (manual input required).";

pub fn trigger_scan<D: DisplayPort + ?Sized>(display: &mut D) {
    display.set_status(SCAN_PLACEHOLDER_STATUS);
}
