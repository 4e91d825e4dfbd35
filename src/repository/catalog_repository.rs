use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Faculty, Program, ProgramLevel, Subject},
    error::{AppError, Result},
    repository::CatalogRepository,
};

#[derive(FromRow)]
struct FacultyRow {
    id: String,
    name: String,
    code: String,
    description: Option<String>,
}

#[derive(FromRow)]
struct ProgramRow {
    id: String,
    faculty_id: String,
    name: String,
    code: String,
    level: String,
    total_semesters: i64,
    description: Option<String>,
}

#[derive(FromRow)]
struct SubjectRow {
    id: String,
    program_id: String,
    name: String,
    code: String,
    semester: i64,
    credits: Option<i64>,
    description: Option<String>,
}

pub struct SqliteCatalogRepository {
    pool: SqlitePool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_faculty(row: FacultyRow) -> Result<Faculty> {
        Ok(Faculty {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            code: row.code,
            description: row.description,
        })
    }

    fn row_to_program(row: ProgramRow) -> Result<Program> {
        Ok(Program {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            faculty_id: Uuid::parse_str(&row.faculty_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            code: row.code,
            level: Self::parse_level(&row.level)?,
            total_semesters: row.total_semesters,
            description: row.description,
        })
    }

    fn row_to_subject(row: SubjectRow) -> Result<Subject> {
        Ok(Subject {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            program_id: Uuid::parse_str(&row.program_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            code: row.code,
            semester: row.semester,
            credits: row.credits,
            description: row.description,
        })
    }

    fn parse_level(s: &str) -> Result<ProgramLevel> {
        match s {
            "Undergraduate" => Ok(ProgramLevel::Undergraduate),
            "Graduate" => Ok(ProgramLevel::Graduate),
            _ => Err(AppError::Database(format!("Invalid program level: {}", s))),
        }
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn create_faculty(&self, faculty: Faculty) -> Result<Faculty> {
        sqlx::query(
            "INSERT INTO faculties (id, name, code, description) VALUES (?, ?, ?, ?)",
        )
        .bind(faculty.id.to_string())
        .bind(&faculty.name)
        .bind(&faculty.code)
        .bind(&faculty.description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(faculty)
    }

    async fn create_program(&self, program: Program) -> Result<Program> {
        sqlx::query(
            r#"
            INSERT INTO programs (id, faculty_id, name, code, level, total_semesters, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(program.id.to_string())
        .bind(program.faculty_id.to_string())
        .bind(&program.name)
        .bind(&program.code)
        .bind(program.level.as_str())
        .bind(program.total_semesters)
        .bind(&program.description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(program)
    }

    async fn create_subject(&self, subject: Subject) -> Result<Subject> {
        sqlx::query(
            r#"
            INSERT INTO subjects (id, program_id, name, code, semester, credits, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(subject.id.to_string())
        .bind(subject.program_id.to_string())
        .bind(&subject.name)
        .bind(&subject.code)
        .bind(subject.semester)
        .bind(subject.credits)
        .bind(&subject.description)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(subject)
    }

    async fn list_faculties(&self) -> Result<Vec<Faculty>> {
        let rows = sqlx::query_as::<_, FacultyRow>(
            "SELECT id, name, code, description FROM faculties ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_faculty).collect()
    }

    async fn list_programs(&self, faculty_id: Option<Uuid>) -> Result<Vec<Program>> {
        let rows = match faculty_id {
            Some(faculty_id) => {
                sqlx::query_as::<_, ProgramRow>(
                    r#"
                    SELECT id, faculty_id, name, code, level, total_semesters, description
                    FROM programs
                    WHERE faculty_id = ?
                    ORDER BY name
                    "#,
                )
                .bind(faculty_id.to_string())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ProgramRow>(
                    r#"
                    SELECT id, faculty_id, name, code, level, total_semesters, description
                    FROM programs
                    ORDER BY name
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_program).collect()
    }

    async fn list_subjects(&self, program_id: Uuid, semester: Option<i64>) -> Result<Vec<Subject>> {
        let rows = match semester {
            Some(semester) => {
                sqlx::query_as::<_, SubjectRow>(
                    r#"
                    SELECT id, program_id, name, code, semester, credits, description
                    FROM subjects
                    WHERE program_id = ? AND semester = ?
                    ORDER BY semester ASC, name
                    "#,
                )
                .bind(program_id.to_string())
                .bind(semester)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, SubjectRow>(
                    r#"
                    SELECT id, program_id, name, code, semester, credits, description
                    FROM subjects
                    WHERE program_id = ?
                    ORDER BY semester ASC, name
                    "#,
                )
                .bind(program_id.to_string())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_subject).collect()
    }
}
