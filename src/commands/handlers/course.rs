//! Course command handlers
//!
//! Handles: add_course, my_courses, del_course, import_json
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{get_integer_option, get_string_option};
use crate::core::errors::ScheduleError;
use crate::core::weekday::weekday_name;
use crate::delivery::DISCORD_PROVIDER_ID;
use crate::features::schedule::Course;

/// Handler for schedule management commands
pub struct CourseHandler;

#[async_trait]
impl SlashCommandHandler for CourseHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["add_course", "my_courses", "del_course", "import_json"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "add_course" => self.handle_add_course(&ctx, serenity_ctx, command).await,
            "my_courses" => self.handle_my_courses(&ctx, serenity_ctx, command).await,
            "del_course" => self.handle_del_course(&ctx, serenity_ctx, command).await,
            "import_json" => self.handle_import_json(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl CourseHandler {
    /// Handle /add_course - register one weekly course
    async fn handle_add_course(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        let conversation_id = command.channel_id.to_string();

        let weekday = get_string_option(&command.data.options, "weekday")
            .ok_or_else(|| anyhow::anyhow!("Missing weekday parameter"))?;
        let time = get_string_option(&command.data.options, "time")
            .ok_or_else(|| anyhow::anyhow!("Missing time parameter"))?;
        let name = get_string_option(&command.data.options, "name")
            .ok_or_else(|| anyhow::anyhow!("Missing name parameter"))?;
        let location = get_string_option(&command.data.options, "location")
            .ok_or_else(|| anyhow::anyhow!("Missing location parameter"))?;

        let result = ctx
            .repository
            .add_course(
                &user_id,
                DISCORD_PROVIDER_ID,
                &conversation_id,
                &weekday,
                &time,
                &name,
                &location,
            )
            .await;

        let content = match result {
            Ok(course) => {
                info!("User {user_id} added course '{}'", course.name);
                format!(
                    "✅ Added **{}** — {} at {} ({})",
                    course.name,
                    weekday_name(course.day),
                    course.time,
                    course.location
                )
            }
            Err(e) => render_user_error(e)?,
        };

        respond(serenity_ctx, command, &content).await
    }

    /// Handle /my_courses - numbered schedule listing
    async fn handle_my_courses(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        debug!("Listing courses for user {user_id}");

        let courses = ctx.repository.list_courses(&user_id).await;

        let content = if courses.is_empty() {
            "📭 You have no courses yet. Use `/add_course` to add one.".to_string()
        } else {
            format_course_list(&courses)
        };

        respond(serenity_ctx, command, &content).await
    }

    /// Handle /del_course - remove a course by display number
    async fn handle_del_course(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();

        let index = get_integer_option(&command.data.options, "index")
            .ok_or_else(|| anyhow::anyhow!("Missing index parameter"))?;

        let content = match ctx.repository.delete_course(&user_id, index).await {
            Ok(removed) => {
                info!("User {user_id} removed course '{}'", removed.name);
                format!("🗑️ Removed **{}**.", removed.name)
            }
            Err(e) => render_user_error(e)?,
        };

        respond(serenity_ctx, command, &content).await
    }

    /// Handle /import_json - bulk import from a pasted JSON array
    async fn handle_import_json(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        let conversation_id = command.channel_id.to_string();

        let payload = get_string_option(&command.data.options, "payload")
            .ok_or_else(|| anyhow::anyhow!("Missing payload parameter"))?;

        let result = ctx
            .repository
            .import_courses(&user_id, DISCORD_PROVIDER_ID, &conversation_id, &payload)
            .await;

        let content = match result {
            Ok(0) => "⚠️ No valid courses found in the payload. Each item needs \
                      `day`, `time`, `name`, and `location`."
                .to_string(),
            Ok(count) => {
                info!("User {user_id} imported {count} course(s)");
                format!("✅ Imported {count} course(s). Use `/my_courses` to review.")
            }
            Err(e) => render_user_error(e)?,
        };

        respond(serenity_ctx, command, &content).await
    }
}

/// Render a validation error as response text; anything infrastructural
/// (persistence failures) propagates to the dispatcher instead.
fn render_user_error(e: ScheduleError) -> Result<String> {
    if e.is_user_error() {
        Ok(format!("❌ {e}"))
    } else {
        Err(e.into())
    }
}

/// Numbered list in stored order, e.g. `1. Monday 14:30 | Math @ Room1`.
fn format_course_list(courses: &[Course]) -> String {
    let mut lines = vec!["📅 **Your course schedule:**".to_string()];
    for (idx, course) in courses.iter().enumerate() {
        lines.push(format!(
            "{}. {} {} | {} @ {}",
            idx + 1,
            weekday_name(course.day),
            course.time,
            course.name,
            course.location
        ));
    }
    lines.join("\n")
}

async fn respond(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: &str,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|msg| msg.content(content))
        })
        .await?;
    Ok(())
}
