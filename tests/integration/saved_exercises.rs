//! Saving and restoring exercise selections

use kipygen::error::ExerciseError;
use kipygen::exercise::Exercise;
use kipygen::persistence::SavedExercise;
use kipygen::registry::TaskRegistry;
use tempfile::TempDir;

#[test]
fn test_every_filtered_exercise_round_trips() {
    let registry = TaskRegistry::with_builtin_tasks().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let mut rng = rand::thread_rng();

    for (index, exercise) in Exercise::filter_by_complexity(&registry, &mut rng, 3, 12).enumerate() {
        let path = temp_dir.path().join(format!("exercise-{}.json", index));
        SavedExercise::from_exercise(&exercise).write_to(&path).unwrap();
        let restored = SavedExercise::read_from(&path)
            .unwrap()
            .restore(&registry)
            .unwrap();
        assert_eq!(restored.task_names(), exercise.task_names());
        assert_eq!(restored.complexity(), exercise.complexity());
    }
}

#[test]
fn test_restore_of_empty_selection_fails() {
    let registry = TaskRegistry::with_builtin_tasks().unwrap();
    let saved = SavedExercise { tasks: vec![] };
    assert!(matches!(saved.restore(&registry), Err(ExerciseError::Empty)));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        SavedExercise::read_from(&temp_dir.path().join("missing.json")),
        Err(ExerciseError::IoError(_))
    ));
}
