use std::sync::Arc;

use gradebook::errors::{EntityKind, ServiceError};
use gradebook::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use gradebook::models::grades::requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest};
use gradebook::models::users::entities::{User, UserRole};
use gradebook::models::users::requests::CreateUserRequest;
use gradebook::policy::{Denial, Identity};
use gradebook::services::GradebookService;
use gradebook::storage::Storage;
use gradebook::storage::memory_storage::MemoryStorage;
use gradebook::validation::ValidationError;

struct Fixture {
    service: GradebookService,
    storage: Arc<dyn Storage>,
    teacher: Identity,
    other_teacher: Identity,
    alice: Identity,
    bob: Identity,
}

async fn create_user(storage: &Arc<dyn Storage>, email: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            full_name: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role,
        })
        .await
        .unwrap()
}

async fn fixture() -> Fixture {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let teacher = create_user(&storage, "teacher@example.com", UserRole::Teacher).await;
    let other = create_user(&storage, "other@example.com", UserRole::Teacher).await;
    let alice = create_user(&storage, "alice@example.com", UserRole::Student).await;
    let bob = create_user(&storage, "bob@example.com", UserRole::Student).await;

    Fixture {
        service: GradebookService::new(storage.clone()),
        storage,
        teacher: Identity::from(&teacher),
        other_teacher: Identity::from(&other),
        alice: Identity::from(&alice),
        bob: Identity::from(&bob),
    }
}

fn assignment_request(max_score: f64) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        title: "Lab 1".to_string(),
        description: Some("Basics".to_string()),
        max_score,
        deadline: None,
    }
}

fn grade_request(assignment_id: i64, student_id: i64, score: f64) -> CreateGradeRequest {
    CreateGradeRequest {
        assignment_id,
        student_id,
        score,
        comment: None,
    }
}

#[tokio::test]
async fn student_without_grades_has_zero_average() {
    let f = fixture().await;
    f.service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();

    let report = f.service.student_report(&f.teacher, f.alice.id).await.unwrap();
    assert_eq!(report.average_score, 0.0);
    assert_eq!(report.completed_assignments, 0);
    assert_eq!(report.total_assignments, 1);
}

#[tokio::test]
async fn scores_just_outside_range_are_rejected() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();

    for score in [100.01, -0.01] {
        let err = f
            .service
            .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, score))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::ScoreOutOfRange { max_score }) if max_score == 100.0
        ));
    }

    let grade = f
        .service
        .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, 100.0))
        .await
        .unwrap();
    let err = f
        .service
        .update_grade(
            &f.teacher,
            grade.id,
            UpdateGradeRequest {
                score: Some(100.01),
                comment: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::ScoreOutOfRange { .. })
    ));
}

#[tokio::test]
async fn second_grade_for_pair_is_duplicate_regardless_of_score() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();
    f.service
        .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, 80.0))
        .await
        .unwrap();

    for score in [80.0, 10.0, 500.0] {
        let err = f
            .service
            .create_grade(&f.other_teacher, grade_request(hw.id, f.alice.id, score))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::DuplicateGrade)
        ));
    }
}

#[tokio::test]
async fn student_listing_never_leaks_other_students() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();
    f.service
        .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, 80.0))
        .await
        .unwrap();
    let bobs = f
        .service
        .create_grade(&f.teacher, grade_request(hw.id, f.bob.id, 60.0))
        .await
        .unwrap();

    let query = GradeListQuery {
        assignment_id: None,
        student_id: Some(f.bob.id),
    };
    let grades = f.service.list_grades(&f.alice, query).await.unwrap();
    assert_eq!(grades.len(), 1);
    assert!(grades.iter().all(|g| g.grade.student_id == f.alice.id));

    let err = f.service.get_grade(&f.alice, bobs.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Denied(Denial::NotSubject)));

    let all = f
        .service
        .list_grades(&f.teacher, GradeListQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    let filtered = f
        .service
        .list_grades(
            &f.teacher,
            GradeListQuery {
                assignment_id: Some(hw.id),
                student_id: Some(f.bob.id),
            },
        )
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].grade.id, bobs.id);
    assert_eq!(filtered[0].student.as_ref().map(|s| s.id), Some(f.bob.id));
}

#[tokio::test]
async fn only_creator_may_change_assignment_but_any_teacher_grades() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();

    let err = f
        .service
        .update_assignment(
            &f.other_teacher,
            hw.id,
            UpdateAssignmentRequest {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Denied(Denial::NotOwner)));

    let err = f
        .service
        .delete_assignment(&f.other_teacher, hw.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Denied(Denial::NotOwner)));

    let err = f
        .service
        .delete_assignment(&f.alice, hw.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Denied(Denial::RoleMismatch { .. })
    ));

    let grade = f
        .service
        .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, 70.0))
        .await
        .unwrap();
    let updated = f
        .service
        .update_grade(
            &f.other_teacher,
            grade.id,
            UpdateGradeRequest {
                score: Some(75.0),
                comment: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.score, 75.0);

    let renamed = f
        .service
        .update_assignment(
            &f.teacher,
            hw.id,
            UpdateAssignmentRequest {
                title: Some("Lab 1 (revised)".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.title, "Lab 1 (revised)");
    assert_eq!(renamed.max_score, 100.0);
}

#[tokio::test]
async fn course_average_is_average_of_student_averages() {
    let f = fixture().await;
    let hw1 = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();
    let hw2 = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();

    for (assignment_id, student_id, score) in [
        (hw1.id, f.alice.id, 80.0),
        (hw2.id, f.alice.id, 100.0),
        (hw1.id, f.bob.id, 50.0),
    ] {
        f.service
            .create_grade(&f.teacher, grade_request(assignment_id, student_id, score))
            .await
            .unwrap();
    }

    let report = f.service.course_report(&f.teacher).await.unwrap();
    assert_eq!(report.total_students, 2);
    assert_eq!(report.total_assignments, 2);
    assert_eq!(report.average_score, 70.0);

    let err = f.service.course_report(&f.alice).await.unwrap_err();
    assert!(err.is_denied());
}

#[tokio::test]
async fn deleting_assignment_removes_its_grades() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();
    let g1 = f
        .service
        .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, 80.0))
        .await
        .unwrap();
    let g2 = f
        .service
        .create_grade(&f.teacher, grade_request(hw.id, f.bob.id, 90.0))
        .await
        .unwrap();

    f.service.delete_assignment(&f.teacher, hw.id).await.unwrap();

    for id in [g1.id, g2.id] {
        let err = f.service.get_grade(&f.teacher, id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Grade)));
    }
    let err = f.service.get_assignment(&f.teacher, hw.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Assignment)));
}

#[tokio::test]
async fn comment_only_update_refreshes_graded_at() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();
    let grade = f
        .service
        .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, 80.0))
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let updated = f
        .service
        .update_grade(
            &f.teacher,
            grade.id,
            UpdateGradeRequest {
                score: None,
                comment: Some(Some("Good work".to_string())),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.score, 80.0);
    assert_eq!(updated.comment.as_deref(), Some("Good work"));
    assert!(updated.graded_at > grade.graded_at);
}

#[tokio::test]
async fn create_grade_checks_assignment_then_student() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();

    let err = f
        .service
        .create_grade(&f.teacher, grade_request(999, 999, 500.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Assignment)));

    // 教师账号不能作为被评分的学生
    let err = f
        .service
        .create_grade(&f.teacher, grade_request(hw.id, f.other_teacher.id, 50.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Student)));

    let err = f
        .service
        .create_grade(&f.alice, grade_request(999, f.alice.id, 50.0))
        .await
        .unwrap_err();
    assert!(err.is_denied());
}

#[tokio::test]
async fn authorization_precedes_lookup_for_role_gates() {
    let f = fixture().await;

    let err = f
        .service
        .update_assignment(&f.alice, 12345, UpdateAssignmentRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_denied());

    let err = f.service.delete_grade(&f.alice, 12345).await.unwrap_err();
    assert!(err.is_denied());

    let err = f
        .service
        .update_assignment(&f.teacher, 12345, UpdateAssignmentRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = f.service.get_grade(&f.alice, 12345).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn max_score_must_be_positive() {
    let f = fixture().await;
    let err = f
        .service
        .create_assignment(&f.teacher, assignment_request(0.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NonPositiveMaxScore)
    ));

    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(10.0))
        .await
        .unwrap();
    let err = f
        .service
        .update_assignment(
            &f.teacher,
            hw.id,
            UpdateAssignmentRequest {
                max_score: Some(-5.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NonPositiveMaxScore)
    ));
}

#[tokio::test]
async fn listings_include_related_records() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();
    let grade = f
        .service
        .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, 88.0))
        .await
        .unwrap();

    let assignments = f.service.list_assignments(&f.alice).await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(
        assignments[0].teacher.as_ref().map(|t| t.id),
        Some(f.teacher.id)
    );

    let detail = f.service.get_grade(&f.alice, grade.id).await.unwrap();
    assert_eq!(detail.assignment.as_ref().map(|a| a.id), Some(hw.id));
    assert_eq!(detail.student.as_ref().map(|s| s.id), Some(f.alice.id));
}

#[tokio::test]
async fn user_directory_is_readable_by_everyone() {
    let f = fixture().await;

    let me = f.service.current_user(&f.bob).await.unwrap();
    assert_eq!(me.email, "bob@example.com");

    let students = f.service.list_students(&f.alice).await.unwrap();
    assert_eq!(students.len(), 2);

    let teachers = f
        .service
        .list_users(&f.alice, Some("teacher"))
        .await
        .unwrap();
    assert_eq!(teachers.len(), 2);
    assert!(teachers.iter().all(|u| u.role == UserRole::Teacher));

    let everyone = f.service.list_users(&f.alice, None).await.unwrap();
    assert_eq!(everyone.len(), 4);

    let err = f
        .service
        .list_users(&f.alice, Some("admin"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidField { field: "role", .. })
    ));

    let err = f.service.get_user(&f.alice, 9999).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::User)));

    let err = f.service.student_report(&f.teacher, f.other_teacher.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(EntityKind::Student)));

    assert_eq!(f.storage.count_users().await.unwrap(), 4);
}

#[tokio::test]
async fn explicit_null_clears_optional_fields() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(
            &f.teacher,
            CreateAssignmentRequest {
                deadline: Some(chrono::Utc::now()),
                ..assignment_request(100.0)
            },
        )
        .await
        .unwrap();
    let grade = f
        .service
        .create_grade(
            &f.teacher,
            CreateGradeRequest {
                comment: Some("Needs work".to_string()),
                ..grade_request(hw.id, f.alice.id, 60.0)
            },
        )
        .await
        .unwrap();

    // 缺省字段保持不变
    let untouched: UpdateGradeRequest = serde_json::from_str(r#"{"score": 65.0}"#).unwrap();
    let updated = f
        .service
        .update_grade(&f.teacher, grade.id, untouched)
        .await
        .unwrap();
    assert_eq!(updated.score, 65.0);
    assert_eq!(updated.comment.as_deref(), Some("Needs work"));

    let cleared: UpdateGradeRequest = serde_json::from_str(r#"{"comment": null}"#).unwrap();
    let updated = f
        .service
        .update_grade(&f.teacher, grade.id, cleared)
        .await
        .unwrap();
    assert_eq!(updated.score, 65.0);
    assert_eq!(updated.comment, None);

    let cleared: UpdateAssignmentRequest =
        serde_json::from_str(r#"{"description": null, "deadline": null}"#).unwrap();
    let updated = f
        .service
        .update_assignment(&f.teacher, hw.id, cleared)
        .await
        .unwrap();
    assert_eq!(updated.title, "Lab 1");
    assert_eq!(updated.description, None);
    assert_eq!(updated.deadline, None);
}

#[tokio::test]
async fn student_report_grades_include_assignment() {
    let f = fixture().await;
    let hw = f
        .service
        .create_assignment(&f.teacher, assignment_request(100.0))
        .await
        .unwrap();
    f.service
        .create_grade(&f.teacher, grade_request(hw.id, f.alice.id, 90.0))
        .await
        .unwrap();

    let report = f.service.student_report(&f.teacher, f.alice.id).await.unwrap();
    assert_eq!(report.completed_assignments, 1);
    assert_eq!(
        report.grades[0].assignment.as_ref().map(|a| a.title.as_str()),
        Some("Lab 1")
    );

    let course = f.service.course_report(&f.teacher).await.unwrap();
    let alice = course
        .student_reports
        .iter()
        .find(|r| r.student.id == f.alice.id)
        .unwrap();
    assert_eq!(alice.grades[0].assignment.as_ref().map(|a| a.id), Some(hw.id));
}
