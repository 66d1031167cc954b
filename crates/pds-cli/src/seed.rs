//! `pds seed`: sample records for a fresh database.

use anyhow::Result;
use sqlx::PgPool;

use pds_core::graph::ValueGraph;
use pds_core::records::{self, BehaviourDraft, JournalDraft, PlanDraft, StatementDraft};

const JOURNALS: [(&str, &str, &str); 4] = [
    (
        "Grateful for Nature",
        "Today I took a walk in the park and felt truly grateful for the beauty of nature. \
         The trees were especially vibrant.",
        "gratitude",
    ),
    (
        "Difficult Day at Work",
        "Today was challenging with tight deadlines and technical issues. \
         I felt frustrated when my code wouldn't compile correctly.",
        "frustrations",
    ),
    (
        "Family Dinner",
        "I'm grateful for the wonderful dinner with my family tonight. \
         These moments of connection are precious.",
        "gratitude",
    ),
    (
        "Traffic Jam",
        "Was stuck in traffic for over an hour today. \
         It was frustrating to waste so much time just sitting in my car.",
        "frustrations",
    ),
];

pub async fn run_seed(pool: &PgPool) -> Result<()> {
    for (title, content, journal_type) in JOURNALS {
        let journal = records::create_journal(
            pool,
            &JournalDraft {
                title: title.to_owned(),
                content: content.to_owned(),
                journal_type: journal_type.to_owned(),
            },
        )
        .await?;
        println!("Created {journal_type} journal entry with ID: {}", journal.id);
    }

    let graph = ValueGraph::new(pool);
    let health = graph
        .create("Health", Some("Physical and mental wellbeing"), &[])
        .await?;
    let family = graph
        .create("Family", Some("Time and care for the people closest to me"), &[])
        .await?;
    let cooking = graph
        .create("Cook at home", Some("Shared, healthy meals"), &[health.id, family.id])
        .await?;
    println!(
        "Created values: {} ({}), {} ({}), {} ({})",
        health.name, health.id, family.name, family.id, cooking.name, cooking.id
    );

    let plan = records::create_plan(
        pool,
        &PlanDraft {
            name: "Morning run".to_owned(),
            description: "Three 5k runs a week before work".to_owned(),
            resources_required: "Running shoes, 30 minutes".to_owned(),
            value_ref: health.id.to_string(),
        },
    )
    .await?;
    println!("Created plan with ID: {}", plan.id);

    let statement = records::create_statement(
        pool,
        &StatementDraft {
            content: "I show up for the people I love.".to_owned(),
            priority: "1".to_owned(),
        },
    )
    .await?;
    println!("Created statement with ID: {}", statement.id);

    let behaviour = records::create_behaviour(
        pool,
        &BehaviourDraft {
            name: "Late-night scrolling".to_owned(),
            description: "Phone in bed past midnight".to_owned(),
            mark: "-".to_owned(),
            conflicting_aim_ref: health.id.to_string(),
        },
    )
    .await?;
    println!("Created behaviour with ID: {}", behaviour.id);

    Ok(())
}
