use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::utils::output_empty_collection;
use crate::cli::OutputFormat;
use crate::database::TeacherStore;

#[derive(Subcommand)]
pub enum TeacherCommands {
    #[command(about = "List the teachers a user created")]
    List {
        #[arg(help = "User id")]
        user: Uuid,
    },

    #[command(about = "Show one teacher")]
    Show {
        #[arg(help = "Teacher id")]
        id: Uuid,
    },
}

pub async fn handle(cmd: TeacherCommands, store: &dyn TeacherStore, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TeacherCommands::List { user } => {
            let Some(populated) = store.find_user_with_teachers(user).await? else {
                anyhow::bail!("no user with id {}", user);
            };
            if populated.teachers.is_empty() {
                return output_empty_collection(
                    output_format,
                    "teacher",
                    &format!("{} has no teachers", populated.user.name),
                );
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "teacher": populated.teachers }))?);
                }
                OutputFormat::Text => {
                    println!("{:<36}  {:<24}  {:<16}  {}", "ID", "NAME", "PHONE", "EMAIL");
                    for teacher in &populated.teachers {
                        println!("{:<36}  {:<24}  {:<16}  {}", teacher.id, teacher.name, teacher.phone, teacher.email);
                    }
                }
            }
            Ok(())
        }
        TeacherCommands::Show { id } => {
            let Some(teacher) = store.find_teacher(id).await? else {
                anyhow::bail!("no teacher with id {}", id);
            };

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "teacher": teacher }))?);
                }
                OutputFormat::Text => {
                    println!("id:      {}", teacher.id);
                    println!("name:    {}", teacher.name);
                    println!("phone:   {}", teacher.phone);
                    println!("email:   {}", teacher.email);
                    println!("creator: {}", teacher.creator);
                }
            }
            Ok(())
        }
    }
}
