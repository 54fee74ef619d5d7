// system-tests/tests/suites/projects_id.rs
// ============================================================================
// Module: Project Item Suite
// Description: Live `projects_id` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("projects_id" =>
    get_project_by_id,
    put_project_by_id,
    delete_project_by_id,
    patch_project_by_id_not_allowed,
    options_project_by_id,
);
