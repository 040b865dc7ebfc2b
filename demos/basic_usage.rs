//! Basic TableHaus usage: load a schema, save, query and delete records.
//!
//! Run with `cargo run --example basic_usage`. Reads `tablehaus.toml` (or the
//! file named by `TABLEHAUS_CONFIG`) when present, otherwise uses `demo.db`.

use tablehaus::prelude::*;

#[model]
#[table(name = "users")]
pub struct User {
    pub id: i64,
    pub name: String,
    #[field(skip)]
    pub greeting: String,
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
DELETE FROM users;
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match AppConfig::load() {
        Ok(config) => config.database,
        Err(_) => DatabaseConfig::sqlite("demo.db"),
    };

    let tablehaus = TableHaus::new(config).await?;
    tablehaus.exec_script(SCHEMA).await?;

    let mut session = tablehaus.session();
    for name in ["bob", "mike", "john"] {
        let mut user = User {
            name: name.to_string(),
            ..Default::default()
        };
        session.table_for::<User>()?.save(&mut user).await?;
        println!("Inserted {} with id {}", user.name, user.id);
    }
    session.commit().await?;

    let mut users: Vec<User> = Vec::new();
    session
        .table("users")
        .query()
        .order_desc(["name"])
        .all(&mut users)
        .await?;
    for user in &mut users {
        user.greeting = format!("Hello, {}!", user.name);
        println!("{:>3} {}", user.id, user.greeting);
    }

    let mut bob = User::default();
    session
        .table("users")
        .query()
        .filter("name =", "bob")
        .one(&mut bob)
        .await?;
    session.table("users").delete(&bob).await?;

    let remaining = session.table("users").query().count().await?;
    println!("{} users left after deleting bob", remaining);

    session.commit().await?;
    Ok(())
}
