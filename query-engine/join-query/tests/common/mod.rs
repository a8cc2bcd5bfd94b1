#![allow(dead_code)]

use indoc::indoc;
use join_query::{Application, Hook, HookContext};
use serde_json::Value;

/// Todos belong to users, users belong to teams, teams have many users.
pub const APP: &str = indoc! {r#"
    {
      "entities": {
        "users": {
          "associations": {
            "team": { "target": "teams" },
            "todos": { "target": "todos" }
          }
        },
        "teams": {
          "associations": { "users": { "target": "users" } }
        },
        "todos": {
          "associations": { "user": { "target": "users" } }
        }
      },
      "services": { "/users": "users", "/teams": "teams", "/todos": "todos" }
    }
"#};

pub fn app() -> Application {
    Application::from_json(APP).expect("fixture application is valid")
}

pub fn context(value: Value) -> HookContext {
    serde_json::from_value(value).expect("fixture context is valid")
}

/// Runs the join hook over `ctx` and returns the resulting context as JSON.
pub fn join(app: &Application, value: Value) -> Value {
    let mut ctx = context(value);
    app.join_query().run(&mut ctx).expect("join query succeeds");

    serde_json::to_value(&ctx).unwrap()
}
