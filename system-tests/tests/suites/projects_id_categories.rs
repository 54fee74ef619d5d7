// system-tests/tests/suites/projects_id_categories.rs
// ============================================================================
// Module: Project Categories Suite
// Description: Live `projects_id_categories` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("projects_id_categories" =>
    post_project_category,
    get_project_categories,
    put_project_categories_not_allowed,
    patch_project_categories_not_allowed,
    options_project_categories,
);
