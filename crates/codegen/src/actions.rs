/// The seven resource-controller actions, in generation order
pub const DEFAULT_ACTIONS: [&str; 7] = ["index", "show", "create", "store", "edit", "update", "destroy"];

/// Policy ability checked by the request class generated for `action`.
///
/// Form-rendering and persistence actions share an ability (`edit` and
/// `update` both check `update`, `store` checks `create`); `show` and
/// `destroy` map to the conventional `view` and `delete` policy methods.
/// Any other action checks an ability of the same name.
pub fn ability_for(action: &str) -> &str {
    match action {
        "store" => "create",
        "edit" | "update" => "update",
        "show" => "view",
        "destroy" => "delete",
        other => other,
    }
}

/// Parse a comma separated action list (`index, show,store`), dropping blanks
pub fn parse_actions(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|action| !action.is_empty())
        .map(str::to_string)
        .collect()
}
