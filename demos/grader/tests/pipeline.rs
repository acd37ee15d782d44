//! End-to-end grading of small instructor and student projects on disk.

use code_grader::{Chunker, Grader, GradeError, write_report};
use composable_todo_testing::init_test_tracing;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const APP: &str = "import Header from './components/Header';\n\
import Footer from './components/Footer';\n\
import TodoList from './components/TodoList';\n\
function App() {\n  return <><Header /><TodoList /><Footer /></>;\n}\n\
export default App;\n";

const TODO_ITEM_STUDENT: &str = "function TodoItem({ todo, onToggle }) {\n\
  return <li onClick={() => onToggle(todo.id)}>{todo.text}</li>;\n}\n\
export default TodoItem;\n";

const TODO_ITEM_COMPLETE: &str = "import PropTypes from 'prop-types';\n\
function TodoItem({ todo, onToggle, onDelete }) {\n\
  return <li>{formatMessage(todo.text)}<button onClick={() => onDelete(todo.id)}>Delete</button></li>;\n}\n\
TodoItem.propTypes = { todo: PropTypes.object.isRequired };\n\
export default TodoItem;\n";

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn projects() -> (TempDir, TempDir) {
    let instructor = tempfile::tempdir().unwrap();
    write(instructor.path(), "App.jsx", APP);
    write(instructor.path(), "components/TodoItem.js", TODO_ITEM_COMPLETE);
    write(instructor.path(), "package.json", "{}");

    let student = tempfile::tempdir().unwrap();
    write(student.path(), "App.jsx", APP);
    write(student.path(), "components/TodoItem.js", TODO_ITEM_STUDENT);
    write(student.path(), "node_modules/react/index.js", "export default React;");
    write(student.path(), "eslint.config.js", "export default [];");

    (instructor, student)
}

#[test]
fn grade_student_project() {
    init_test_tracing();
    let (instructor, student) = projects();

    let grader = Grader::load(instructor.path(), student.path()).unwrap();
    let summary = grader.summary();
    assert_eq!(summary.instructor_files, 2);
    assert_eq!(summary.student_files, 2);

    let report = grader.grade();
    assert_eq!(report.chunks.len(), grader.student_chunks().len());
    assert!(!report.chunks.is_empty());

    let scores: Vec<u32> = report.chunks.iter().map(|c| c.score).collect();
    assert_eq!(report.final_score, code_grader::final_score(&scores));
    assert!(report.chunks.iter().all(|c| c.closest_reference.is_some()));
    // The student row never uses PropTypes or the formatter
    assert!(
        report
            .chunks
            .iter()
            .all(|c| c.feedback.contains(&"PropTypes or helper functions missing."))
    );
}

#[test]
fn single_chunk_project_scores_that_chunk() {
    let (instructor, student) = projects();

    let grader = Grader::load_with(instructor.path(), student.path(), Chunker::new(2000, 50).unwrap())
        .unwrap();
    let report = grader.grade();

    // Whole project fits one chunk: everything but PropTypes/helpers
    assert_eq!(report.chunks.len(), 1);
    assert_eq!(report.final_score, Some(85));
}

#[test]
fn reports_are_written() {
    let (instructor, student) = projects();
    let out = tempfile::tempdir().unwrap();
    let grader = Grader::load(instructor.path(), student.path()).unwrap();

    let feedback = out.path().join("student_feedback.txt");
    write_report(&feedback, &grader.grade()).unwrap();
    let text = fs::read_to_string(&feedback).unwrap();
    assert!(text.starts_with("===== Student Project Feedback ====="));
    assert!(text.contains("🏆 Final Project Score: "));

    let similarity = out.path().join("similarity_results.txt");
    write_report(&similarity, &grader.compare(5, 2)).unwrap();
    assert!(fs::read_to_string(&similarity).unwrap().contains("📌 Closest Instructor Chunks:"));
}

#[test]
fn missing_student_directory() {
    let (instructor, _student) = projects();
    let missing = instructor.path().join("student_code");

    assert!(matches!(
        Grader::load(instructor.path(), &missing),
        Err(GradeError::MissingDirectory(_))
    ));
}
