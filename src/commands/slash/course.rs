//! # Course Commands
//!
//! Definitions for the schedule management commands.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_add_course_command(),
        create_my_courses_command(),
        create_del_course_command(),
        create_import_json_command(),
    ]
}

fn create_add_course_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("add_course")
        .description("Add a weekly course to your schedule")
        .create_option(|option| {
            option
                .name("weekday")
                .description("Weekday: Monday..Sunday or 1-7")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(16)
        })
        .create_option(|option| {
            option
                .name("time")
                .description("Start time in 24-hour HH:MM, e.g. 14:30")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(5)
                .max_length(5)
        })
        .create_option(|option| {
            option
                .name("name")
                .description("Course name")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(100)
        })
        .create_option(|option| {
            option
                .name("location")
                .description("Where the course takes place")
                .kind(CommandOptionType::String)
                .required(true)
                .max_length(100)
        });
    command
}

fn create_my_courses_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("my_courses")
        .description("Show your course schedule");
    command
}

fn create_del_course_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("del_course")
        .description("Delete a course by its number in /my_courses")
        .create_option(|option| {
            option
                .name("index")
                .description("Course number as shown by /my_courses")
                .kind(CommandOptionType::Integer)
                .required(true)
        });
    command
}

fn create_import_json_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("import_json")
        .description("Bulk-import courses from a JSON array")
        .create_option(|option| {
            option
                .name("payload")
                .description("JSON array of {day, time, name, location} objects")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(2)
        });
    command
}
