//! Tests for the scheduler module.

use std::sync::Arc;

use jiff::civil::{Date, date, datetime};
use tempfile::TempDir;

use super::*;
use crate::{
    models::{EditFields, MinuteInterval, NotificationOption, PlanColor, PlanTemplate, RepeatMode},
    notify::ReminderQueue,
    params::{CheckSlot, ClampDrag, CreatePlan, DeleteGroup, EditPlan, Id, ListPlans},
};

/// Helper function to create a test scheduler with an inspectable queue
async fn create_test_scheduler(notifications: bool) -> (TempDir, Scheduler, Arc<ReminderQueue>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let queue = Arc::new(ReminderQueue::with_now(datetime(2024, 1, 1, 0, 0, 0, 0)));
    let scheduler = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_notifier(queue.clone())
        .with_notifications(notifications)
        .build()
        .await
        .expect("Failed to create scheduler");
    (temp_dir, scheduler, queue)
}

fn template(title: &str, start: &str, end: &str) -> PlanTemplate {
    PlanTemplate {
        title: title.to_string(),
        note: None,
        color: PlanColor::Blue,
        notification_options: vec![NotificationOption::EndTime],
        start: start.parse().expect("valid start"),
        end: end.parse().expect("valid end"),
    }
}

async fn create(scheduler: &Scheduler, day: Date, repeat: RepeatMode) -> Vec<crate::Occurrence> {
    scheduler
        .create_plan(&CreatePlan {
            template: template("Gym", "07:00", "08:00"),
            day,
            repeat,
        })
        .await
        .expect("Failed to create plan")
}

#[tokio::test]
async fn test_create_weekly_group() {
    let (_temp_dir, scheduler, queue) = create_test_scheduler(true).await;

    let created = create(&scheduler, date(2024, 3, 4), RepeatMode::Weekly).await;
    assert_eq!(created.len(), 44);

    let group_id = created[0].group_id.clone().expect("recurring plans are grouped");
    assert!(created.iter().all(|o| o.group_id.as_deref() == Some(group_id.as_str())));
    assert_eq!(created.last().map(|o| o.day()), Some(date(2024, 12, 30)));

    let members = scheduler
        .group_members(&group_id)
        .await
        .expect("Failed to fetch group");
    assert_eq!(members.len(), 44);
    assert_eq!(queue.pending().len(), 44);
}

#[tokio::test]
async fn test_create_single_plan_has_no_group() {
    let (_temp_dir, scheduler, _queue) = create_test_scheduler(true).await;

    let created = create(&scheduler, date(2024, 3, 4), RepeatMode::None).await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].group_id, None);
}

#[tokio::test]
async fn test_create_rejects_invalid_template() {
    let (_temp_dir, scheduler, _queue) = create_test_scheduler(true).await;

    let result = scheduler
        .create_plan(&CreatePlan {
            template: template("  ", "07:00", "08:00"),
            day: date(2024, 3, 4),
            repeat: RepeatMode::Daily,
        })
        .await;
    assert!(matches!(result, Err(SchedulerError::InvalidInput { .. })));

    let listed = scheduler
        .list_plans(&ListPlans {
            from: date(2024, 1, 1),
            to: Some(date(2024, 12, 31)),
        })
        .await
        .expect("Failed to list plans");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_edit_without_rule_change_touches_only_target() {
    let (_temp_dir, scheduler, _queue) = create_test_scheduler(true).await;
    let created = create(&scheduler, date(2024, 3, 4), RepeatMode::Weekly).await;
    let target = &created[1];

    let result = scheduler
        .edit_plan(&EditPlan {
            id: target.id.clone(),
            fields: EditFields {
                title: Some("Swim".to_string()),
                ..Default::default()
            },
            repeat: None,
            today: date(2024, 3, 10),
        })
        .await
        .expect("Failed to edit plan");

    assert_eq!(result.outcome, EditOutcome::Updated);
    assert_eq!(result.occurrence.title, "Swim");

    let group_id = target.group_id.clone().expect("grouped");
    let members = scheduler.group_members(&group_id).await.expect("group");
    assert_eq!(members.len(), 44);
    assert_eq!(members.iter().filter(|o| o.title == "Swim").count(), 1);
}

#[tokio::test]
async fn test_rule_change_regenerates_future_and_keeps_history() {
    let (_temp_dir, scheduler, _queue) = create_test_scheduler(true).await;
    let created = create(&scheduler, date(2024, 3, 4), RepeatMode::Weekly).await;
    let target = &created[1];
    let group_id = target.group_id.clone().expect("grouped");

    let result = scheduler
        .edit_plan(&EditPlan {
            id: target.id.clone(),
            fields: EditFields::default(),
            repeat: Some(RepeatMode::Daily),
            today: date(2024, 3, 10),
        })
        .await
        .expect("Failed to edit plan");

    let (regenerated, removed, siblings) = match result.outcome {
        EditOutcome::Regenerated {
            group_id,
            removed,
            created,
        } => (group_id, removed, created),
        other => panic!("expected regeneration, got {other:?}"),
    };
    assert_eq!(regenerated, group_id);
    assert_eq!(removed.len(), 42);
    // March 12 through December 31
    assert_eq!(siblings.len(), 295);
    assert_eq!(siblings[0].day(), date(2024, 3, 12));

    let members = scheduler.group_members(&group_id).await.expect("group");
    assert_eq!(members.len(), 297);
    // The occurrence before today is untouched
    assert_eq!(members[0].id, created[0].id);
    assert_eq!(members[0].repeat_mode, RepeatMode::Weekly);
    assert_eq!(members[1].id, target.id);
    assert_eq!(members[1].repeat_mode, RepeatMode::Daily);
}

#[tokio::test]
async fn test_switch_to_none_detaches() {
    let (_temp_dir, scheduler, _queue) = create_test_scheduler(true).await;
    let created = create(&scheduler, date(2024, 3, 4), RepeatMode::Weekly).await;
    let target = &created[1];
    let group_id = target.group_id.clone().expect("grouped");

    let result = scheduler
        .edit_plan(&EditPlan {
            id: target.id.clone(),
            fields: EditFields::default(),
            repeat: Some(RepeatMode::None),
            today: date(2024, 3, 10),
        })
        .await
        .expect("Failed to edit plan");

    assert_eq!(result.occurrence.group_id, None);
    match result.outcome {
        EditOutcome::Detached {
            group_id: detached,
            removed,
        } => {
            assert_eq!(detached, group_id);
            assert_eq!(removed.len(), 42);
        }
        other => panic!("expected detach, got {other:?}"),
    }

    let members = scheduler.group_members(&group_id).await.expect("group");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, created[0].id);

    let stored = scheduler
        .get_plan(&Id {
            id: target.id.clone(),
        })
        .await
        .expect("get")
        .expect("still stored");
    assert_eq!(stored.group_id, None);
    assert_eq!(stored.repeat_mode, RepeatMode::None);
}

#[tokio::test]
async fn test_edit_unknown_occurrence() {
    let (_temp_dir, scheduler, _queue) = create_test_scheduler(true).await;

    let result = scheduler
        .edit_plan(&EditPlan {
            id: "missing".to_string(),
            fields: EditFields::default(),
            repeat: None,
            today: date(2024, 3, 10),
        })
        .await;
    assert!(matches!(
        result,
        Err(SchedulerError::OccurrenceNotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_group_forward_and_entirely() {
    let (_temp_dir, scheduler, queue) = create_test_scheduler(true).await;
    let created = create(&scheduler, date(2024, 12, 23), RepeatMode::Daily).await;
    assert_eq!(created.len(), 9);
    let group_id = created[0].group_id.clone().expect("grouped");

    let removed = scheduler
        .delete_group(&DeleteGroup {
            group_id: group_id.clone(),
            from: Some(date(2024, 12, 28)),
            excluding: Some(created[6].id.clone()),
        })
        .await
        .expect("Failed to delete forward");
    // 28th through 31st, minus the excluded 29th
    assert_eq!(removed.len(), 3);
    assert!(!removed.contains(&created[6].id));
    assert!(queue.pending_for(&created[5].id).is_empty());

    let removed = scheduler
        .delete_group(&DeleteGroup {
            group_id: group_id.clone(),
            from: None,
            excluding: None,
        })
        .await
        .expect("Failed to delete group");
    assert_eq!(removed.len(), 6);

    let again = scheduler
        .delete_group(&DeleteGroup {
            group_id,
            from: None,
            excluding: None,
        })
        .await;
    assert!(matches!(again, Err(SchedulerError::GroupNotFound { .. })));
}

#[tokio::test]
async fn test_delete_plan() {
    let (_temp_dir, scheduler, queue) = create_test_scheduler(true).await;
    let created = create(&scheduler, date(2024, 3, 4), RepeatMode::None).await;
    let id = Id {
        id: created[0].id.clone(),
    };
    assert_eq!(queue.pending_for(&id.id).len(), 1);

    scheduler.delete_plan(&id).await.expect("Failed to delete");
    assert!(scheduler.get_plan(&id).await.expect("get").is_none());
    assert!(queue.pending_for(&id.id).is_empty());

    let result = scheduler.delete_plan(&id).await;
    assert!(matches!(
        result,
        Err(SchedulerError::OccurrenceNotFound { .. })
    ));
}

#[tokio::test]
async fn test_toggle_completion_rearms_reminders() {
    let (_temp_dir, scheduler, queue) = create_test_scheduler(true).await;
    let created = create(&scheduler, date(2024, 3, 4), RepeatMode::None).await;
    let id = Id {
        id: created[0].id.clone(),
    };

    let done = scheduler.toggle_completion(&id).await.expect("toggle");
    assert!(done.is_completed);
    assert!(queue.pending_for(&id.id).is_empty());

    let undone = scheduler.toggle_completion(&id).await.expect("toggle");
    assert!(!undone.is_completed);
    assert_eq!(queue.pending_for(&id.id).len(), 1);
}

#[tokio::test]
async fn test_disabled_notifications_arm_nothing() {
    let (_temp_dir, scheduler, queue) = create_test_scheduler(false).await;
    create(&scheduler, date(2024, 3, 4), RepeatMode::Weekly).await;
    assert!(queue.pending().is_empty());
}

#[tokio::test]
async fn test_check_slot_and_clamp_drag() {
    let (_temp_dir, scheduler, _queue) = create_test_scheduler(true).await;
    let created = create(&scheduler, date(2024, 3, 4), RepeatMode::None).await;
    let day = date(2024, 3, 4);
    let interval = |start: &str, end: &str| {
        MinuteInterval::new(start.parse().expect("start"), end.parse().expect("end"))
            .expect("interval")
    };

    let busy = scheduler
        .check_slot(&CheckSlot {
            day,
            interval: interval("07:30", "09:00"),
            excluding: None,
        })
        .await
        .expect("check");
    assert!(!busy.free);
    assert_eq!(busy.conflicts.len(), 1);

    let adjacent = scheduler
        .check_slot(&CheckSlot {
            day,
            interval: interval("08:00", "09:00"),
            excluding: None,
        })
        .await
        .expect("check");
    assert!(adjacent.free);

    let own = scheduler
        .check_slot(&CheckSlot {
            day,
            interval: interval("07:30", "09:00"),
            excluding: Some(created[0].id.clone()),
        })
        .await
        .expect("check");
    assert!(own.free);

    let clamped = scheduler
        .clamp_drag(&ClampDrag {
            day,
            anchor: "06:00".parse().expect("anchor"),
            cursor: "09:00".parse().expect("cursor"),
            excluding: None,
        })
        .await
        .expect("clamp");
    assert_eq!(clamped.to_string(), "07:00");
}

#[tokio::test]
async fn test_list_plans_rejects_reversed_range() {
    let (_temp_dir, scheduler, _queue) = create_test_scheduler(true).await;
    let result = scheduler
        .list_plans(&ListPlans {
            from: date(2024, 3, 5),
            to: Some(date(2024, 3, 4)),
        })
        .await;
    assert!(matches!(result, Err(SchedulerError::InvalidInput { .. })));
}
