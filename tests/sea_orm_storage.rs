use chrono::Utc;

use gradebook::config::DatabaseConfig;
use gradebook::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use gradebook::models::grades::requests::{GradeChanges, GradeListQuery, NewGrade};
use gradebook::models::users::entities::UserRole;
use gradebook::models::users::requests::CreateUserRequest;
use gradebook::storage::Storage;
use gradebook::storage::sea_orm_storage::SeaOrmStorage;

async fn storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config).await.unwrap()
}

fn user(email: &str, role: UserRole) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        full_name: "Test User".to_string(),
        password_hash: "hash".to_string(),
        role,
    }
}

fn new_grade(assignment_id: i64, student_id: i64, score: f64) -> NewGrade {
    NewGrade {
        assignment_id,
        student_id,
        score,
        comment: None,
        graded_at: Utc::now(),
    }
}

async fn seed(storage: &SeaOrmStorage) -> (i64, i64, i64) {
    let teacher = storage
        .create_user(user("t@example.com", UserRole::Teacher))
        .await
        .unwrap();
    let student = storage
        .create_user(user("s@example.com", UserRole::Student))
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Essay".to_string(),
                description: None,
                max_score: 50.0,
                deadline: None,
            },
        )
        .await
        .unwrap();
    (teacher.id, student.id, assignment.id)
}

#[tokio::test]
async fn users_are_unique_by_email_and_filterable_by_role() {
    let storage = storage().await;
    seed(&storage).await;

    let err = storage
        .create_user(user("t@example.com", UserRole::Student))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E004");

    let students = storage.list_users(Some(UserRole::Student)).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].email, "s@example.com");
    assert_eq!(storage.count_users().await.unwrap(), 2);

    let found = storage.get_user_by_email("t@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.role), Some(UserRole::Teacher));
}

#[tokio::test]
async fn grade_pair_is_unique_and_findable() {
    let storage = storage().await;
    let (_, student_id, assignment_id) = seed(&storage).await;

    let grade = storage
        .create_grade(new_grade(assignment_id, student_id, 40.0))
        .await
        .unwrap();
    let found = storage
        .find_grade_by_pair(assignment_id, student_id)
        .await
        .unwrap();
    assert_eq!(found.map(|g| g.id), Some(grade.id));

    let err = storage
        .create_grade(new_grade(assignment_id, student_id, 10.0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E004");

    let listed = storage
        .list_grades(GradeListQuery {
            assignment_id: Some(assignment_id),
            student_id: None,
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn partial_updates_keep_untouched_fields() {
    let storage = storage().await;
    let (_, student_id, assignment_id) = seed(&storage).await;

    let updated = storage
        .update_assignment(
            assignment_id,
            UpdateAssignmentRequest {
                description: Some(Some("Five paragraphs".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Essay");
    assert_eq!(updated.max_score, 50.0);
    assert_eq!(updated.description.as_deref(), Some("Five paragraphs"));

    let grade = storage
        .create_grade(new_grade(assignment_id, student_id, 40.0))
        .await
        .unwrap();
    let changed = storage
        .update_grade(
            grade.id,
            GradeChanges {
                score: None,
                comment: Some(Some("Solid".to_string())),
                graded_at: Utc::now(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(changed.score, 40.0);
    assert_eq!(changed.comment.as_deref(), Some("Solid"));

    assert!(storage
        .update_grade(
            9999,
            GradeChanges {
                score: Some(1.0),
                comment: None,
                graded_at: Utc::now(),
            },
        )
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn deleting_assignment_cascades_to_grades() {
    let storage = storage().await;
    let (_, student_id, assignment_id) = seed(&storage).await;
    let grade = storage
        .create_grade(new_grade(assignment_id, student_id, 40.0))
        .await
        .unwrap();

    assert!(storage.delete_assignment(assignment_id).await.unwrap());
    assert!(storage.get_grade_by_id(grade.id).await.unwrap().is_none());
    assert!(storage.get_assignment_by_id(assignment_id).await.unwrap().is_none());
    assert_eq!(storage.count_assignments().await.unwrap(), 0);

    assert!(!storage.delete_assignment(assignment_id).await.unwrap());
    assert!(!storage.delete_grade(grade.id).await.unwrap());
}

#[tokio::test]
async fn explicit_null_clears_stored_values() {
    let storage = storage().await;
    let (teacher_id, student_id, _) = seed(&storage).await;

    let assignment = storage
        .create_assignment(
            teacher_id,
            CreateAssignmentRequest {
                title: "Project".to_string(),
                description: Some("Team work".to_string()),
                max_score: 100.0,
                deadline: Some(Utc::now()),
            },
        )
        .await
        .unwrap();
    let cleared = storage
        .update_assignment(
            assignment.id,
            UpdateAssignmentRequest {
                description: Some(None),
                deadline: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.title, "Project");
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.deadline, None);

    let grade = storage
        .create_grade(NewGrade {
            comment: Some("Late".to_string()),
            ..new_grade(assignment.id, student_id, 70.0)
        })
        .await
        .unwrap();
    let kept = storage
        .update_grade(
            grade.id,
            GradeChanges {
                score: Some(75.0),
                comment: None,
                graded_at: Utc::now(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.comment.as_deref(), Some("Late"));

    let cleared = storage
        .update_grade(
            grade.id,
            GradeChanges {
                score: None,
                comment: Some(None),
                graded_at: Utc::now(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.score, 75.0);
    assert_eq!(cleared.comment, None);
}
