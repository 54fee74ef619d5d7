// system-tests/tests/suites/todos.rs
// ============================================================================
// Module: Todos Suite
// Description: Live `todos` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("todos" =>
    get_todos_seeded_count,
    get_todos_enveloped,
    get_todos_invalid_param_rejected,
    get_todos_invalid_param_ignored,
    put_todos_not_allowed,
    post_todos,
    post_todos_missing_title,
    delete_todos_not_allowed,
    options_todos_not_allowed,
    options_todos,
    patch_todos_not_allowed,
    head_todos_content_length,
    head_todos_chunked,
    head_todos_invalid_param_rejected,
    head_todos_invalid_param_ignored,
    post_todos_minimum_data,
    post_todos_maximum_data,
    get_todos_title_filter_bare,
    get_todos_title_filter_enveloped,
);
