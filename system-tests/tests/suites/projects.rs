// system-tests/tests/suites/projects.rs
// ============================================================================
// Module: Projects Suite
// Description: Live `projects` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("projects" =>
    get_projects,
    post_projects,
    post_projects_title_only,
    project_matches_schema,
    head_projects,
    put_projects_not_allowed,
    patch_projects_not_allowed,
    delete_projects_not_allowed,
    options_projects,
);
