// system-tests/tests/suites/todos_id_tasksof_id.rs
// ============================================================================
// Module: Tasksof Link Suite
// Description: Live `todos_id_tasksof_id` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("todos_id_tasksof_id" =>
    get_link_not_allowed,
    put_link_not_allowed,
    post_link_not_allowed,
    options_link_not_allowed,
    patch_link_not_allowed,
    head_link_not_allowed,
    delete_seeded_link,
    delete_link_then_missing,
    delete_missing_link,
);
