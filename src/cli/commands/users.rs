use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::database::models::NewUser;
use crate::database::TeacherStore;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user that teachers can be attached to")]
    Add {
        #[arg(help = "Display name")]
        name: String,
        #[arg(help = "Email address")]
        email: String,
    },

    #[command(about = "List users and how many teachers each created")]
    List,
}

pub async fn handle(cmd: UserCommands, store: &dyn TeacherStore, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { name, email } => {
            let name = name.trim().to_string();
            let email = email.trim().to_string();
            if name.is_empty() || email.is_empty() {
                anyhow::bail!("name and email must not be empty");
            }

            let user = store.insert_user(NewUser { name, email }).await?;
            output_success(
                output_format,
                &format!("Created user {} ({})", user.name, user.id),
                Some(json!({ "user": user })),
            )
        }
        UserCommands::List => {
            let users = store.list_users().await?;
            if users.is_empty() {
                return output_empty_collection(output_format, "users", "No users found");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "users": users }))?);
                }
                OutputFormat::Text => {
                    println!("{:<36}  {:<24}  {:<28}  {}", "ID", "NAME", "EMAIL", "TEACHERS");
                    for user in &users {
                        println!("{:<36}  {:<24}  {:<28}  {}", user.id, user.name, user.email, user.teacher.len());
                    }
                }
            }
            Ok(())
        }
    }
}
