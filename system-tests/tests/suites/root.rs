// system-tests/tests/suites/root.rs
// ============================================================================
// Module: Root Suite
// Description: Live `root` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("root" =>
    get_root_is_ready,
);
