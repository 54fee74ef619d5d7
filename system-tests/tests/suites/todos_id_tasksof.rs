// system-tests/tests/suites/todos_id_tasksof.rs
// ============================================================================
// Module: Todo Tasksof Suite
// Description: Live `todos_id_tasksof` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("todos_id_tasksof" =>
    get_tasksof_array,
    get_tasksof_enveloped,
    get_missing_todo_tasksof,
    get_missing_todo_tasksof_ok,
    put_tasksof_not_allowed,
    post_tasksof_link,
    post_tasksof_link_rejected,
    post_tasksof_empty_rejected,
    post_tasksof_empty_creates_project,
    post_tasksof_string_body,
    delete_tasksof_not_allowed,
    options_tasksof_not_allowed,
    options_tasksof,
    patch_tasksof_not_allowed,
    head_tasksof_content_length,
    head_tasksof_no_content_length,
    head_missing_todo_tasksof,
    post_tasksof_minimal,
    post_tasksof_minimal_rejected,
    post_tasksof_large_id,
);
