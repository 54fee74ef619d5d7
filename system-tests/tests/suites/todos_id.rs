// system-tests/tests/suites/todos_id.rs
// ============================================================================
// Module: Todo Item Suite
// Description: Live `todos_id` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("todos_id" =>
    get_seeded_todo_title,
    get_seeded_todo_enveloped,
    get_missing_todo,
    put_todo_round_trip,
    put_todo_missing_title,
    post_todo_amend,
    post_todo_title_only_rejected,
    delete_todo_not_allowed,
    delete_todo_then_missing,
    options_todo_not_allowed,
    options_todo,
    patch_todo_not_allowed,
    head_todo_content_length,
    head_todo_chunked,
    head_missing_todo,
    put_todo_minimal_data,
    put_todo_maximum_data,
);
