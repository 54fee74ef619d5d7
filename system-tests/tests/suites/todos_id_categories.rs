// system-tests/tests/suites/todos_id_categories.rs
// ============================================================================
// Module: Todo Categories Suite
// Description: Live `todos_id_categories` scenarios, one test each.
// Dependencies: system-tests helpers
// ============================================================================

use crate::helpers::live::live_scenarios;

live_scenarios!("todos_id_categories" =>
    get_todo_categories_array,
    get_todo_categories_enveloped,
    get_missing_todo_categories,
    put_todo_categories_not_allowed,
    post_todo_category_link,
    post_todo_category_empty,
    delete_todo_categories_not_allowed,
    options_todo_categories_not_allowed,
    options_todo_categories,
    patch_todo_categories_not_allowed,
    head_todo_categories_content_length,
    head_todo_categories_chunked,
    head_missing_todo_categories,
    head_missing_todo_categories_ok,
    post_todo_category_minimal,
    post_todo_category_minimal_rejected,
    post_todo_category_large_id,
    post_todo_category_large_id_rejected,
);
