//! The internship program: dates, weekly routine, Python curriculum and the texts shown when a
//! block is inspected.

use std::sync::Arc;

use chrono::NaiveDate;

use super::{
    agenda::GENERIC_STUDY_LABEL,
    bounds::ProgramInterval,
    curriculum::CurriculumSequence,
    details::TopicDetailIndex,
    template::{TimeBlock, WeeklyTemplate},
};

pub const PROGRAM_START: NaiveDate = match NaiveDate::from_ymd_opt(2025, 10, 20) {
    Some(v) => v,
    None => panic!("invalid program start"),
};

pub const PROGRAM_END: NaiveDate = match NaiveDate::from_ymd_opt(2026, 10, 19) {
    Some(v) => v,
    None => panic!("invalid program end"),
};

pub const FALLBACK_TOPIC: &str = "Repaso y Aplicación en Proyectos";

const CURRICULUM: [&str; 12] = [
    "Fundamentos: Variables, Tipos de Datos",
    "Fundamentos: Listas, Diccionarios, Tuplas",
    "Fundamentos: Bucles (for, while) y Condicionales",
    "Fundamentos: Funciones y Práctica",
    "Pandas: Series, DataFrames y Lectura de CSV",
    "Pandas: Selección de Datos con .loc[] e .iloc[]",
    "Pandas: Filtrado de Datos y Condiciones",
    "Pandas: Manejo de Datos Faltantes",
    "Pandas: Agrupación de Datos con .groupby()",
    "Pandas: Combinar DataFrames (merge, concat)",
    "NumPy: Creación y Operaciones con Arrays",
    FALLBACK_TOPIC,
];

const TOPIC_DETAILS: [(&str, &str); 11] = [
    (
        "Fundamentos: Variables, Tipos de Datos",
        "Concéntrate en entender qué es una variable y los tipos de datos básicos como strings, integers y floats. Realiza ejercicios prácticos en Codecademy.",
    ),
    (
        "Fundamentos: Listas, Diccionarios, Tuplas",
        "Aprende a manejar colecciones de datos. Practica cómo añadir, eliminar y acceder a elementos en listas y diccionarios.",
    ),
    (
        "Fundamentos: Bucles (for, while) y Condicionales",
        "Domina la lógica de control. Escribe pequeños scripts que usen bucles para iterar sobre listas y condicionales (if/else) para tomar decisiones.",
    ),
    (
        "Fundamentos: Funciones y Práctica",
        "Aprende a escribir tus propias funciones para reutilizar código. Recurso recomendado: Tutorial Interactivo de Codecademy 'Learn Python 3'.",
    ),
    (
        "Pandas: Series, DataFrames y Lectura de CSV",
        "Entiende las dos estructuras de datos principales de Pandas. Practica cargar un archivo CSV en un DataFrame con `pd.read_csv`.",
    ),
    (
        "Pandas: Selección de Datos con .loc[] e .iloc[]",
        "¡Crucial! Practica seleccionar filas y columnas específicas. `.loc` es para etiquetas, `.iloc` es para posiciones numéricas.",
    ),
    (
        "Pandas: Filtrado de Datos y Condiciones",
        "Aplica filtros para encontrar datos que cumplan criterios. Ejemplo: `df[df['ventas'] > 1000]`.",
    ),
    (
        "Pandas: Manejo de Datos Faltantes",
        "Aprende a identificar y manejar datos nulos usando `.isnull()`, `.dropna()` y `.fillna()`.",
    ),
    (
        "Pandas: Agrupación de Datos con .groupby()",
        "Una de las herramientas más poderosas. Agrupa datos por categorías para realizar cálculos agregados como suma o media.",
    ),
    (
        "Pandas: Combinar DataFrames (merge, concat)",
        "Aprende a unir diferentes tablas de datos. `merge` es similar a los JOINs de SQL.",
    ),
    (
        FALLBACK_TOPIC,
        "Aplica todo lo aprendido en tus proyectos de GitHub. La práctica es la clave para consolidar el conocimiento.",
    ),
];

const ANKI: &str = "Estudio Anki";
const ENGLISH_VIDEOS: &str = "Contenido en Inglés (YouTube)";
const PYTHON_PROJECT: &str = "Proyecto Python";
const AI_COURSE: &str = "Estudio Curso IA";
const MORNING_MUSIC: &str = "Música en Inglés (Estudio)";
const LUNCH: &str = "Almuerzo";
const LATE_LUNCH: &str = "Almuerzo / Empezar el día";
const WORK: &str = "Trabajo";

pub fn program_interval() -> ProgramInterval {
    ProgramInterval::new_opt(PROGRAM_START, PROGRAM_END).expect("program start precedes its end")
}

pub fn curriculum() -> CurriculumSequence {
    CurriculumSequence::new(
        PROGRAM_START,
        CURRICULUM.iter().map(|v| Arc::from(*v)).collect(),
        FALLBACK_TOPIC.into(),
    )
}

pub fn topic_details() -> TopicDetailIndex {
    TopicDetailIndex::new(FALLBACK_TOPIC.into())
        .with_topics(GENERIC_STUDY_LABEL, TOPIC_DETAILS)
        .with_plain(
            ANKI,
            "Dedica este tiempo a repasar tus tarjetas de Anki. Concéntrate en conceptos de Python, SQL y Machine Learning para fortalecer tu memoria a largo plazo.",
        )
        .with_plain(
            ENGLISH_VIDEOS,
            "Mira al menos 3 horas de contenido técnico en inglés. Canales recomendados: freeCodeCamp, Corey Schafer, StatQuest with Josh Starmer. Activa los subtítulos en inglés si es necesario.",
        )
        .with_plain(
            PYTHON_PROJECT,
            "Trabaja en uno de tus 3 proyectos de portafolio en GitHub. Enfócate en la limpieza de datos, análisis exploratorio (EDA) o la implementación de un modelo.",
        )
        .with_plain(
            AI_COURSE,
            "Dedica este bloque a tu curso de TalentoDigital.do. Revisa las clases, haz los ejercicios y prepara preguntas para la próxima sesión.",
        )
}

/// Tuesday to Friday share the same morning and afternoon.
fn weekday_core() -> Vec<TimeBlock> {
    vec![
        TimeBlock::new("6:00 AM", "6:40 AM", MORNING_MUSIC),
        TimeBlock::new("9:25 AM", "11:00 AM", GENERIC_STUDY_LABEL).focus(),
        TimeBlock::new("12:00 PM", "1:00 PM", LUNCH),
        TimeBlock::new("1:00 PM", "3:00 PM", WORK),
        TimeBlock::new("4:40 PM", "5:10 PM", ANKI).focus(),
    ]
}

fn with_evening(mut blocks: Vec<TimeBlock>, evening: TimeBlock) -> Vec<TimeBlock> {
    blocks.push(evening);
    blocks
}

pub fn weekly_template() -> WeeklyTemplate {
    WeeklyTemplate::builder()
        .day(
            0,
            vec![
                TimeBlock::new("2:00 PM", "2:30 PM", LATE_LUNCH),
                TimeBlock::new("2:30 PM", "3:00 PM", ANKI).focus(),
                TimeBlock::new("3:00 PM", "6:00 PM", ENGLISH_VIDEOS).focus(),
                TimeBlock::new("6:00 PM", "7:00 PM", "Ver Series en Inglés"),
                TimeBlock::new("7:00 PM", "9:30 PM", "Tiempo Libre / Cena"),
            ],
        )
        .day(
            1,
            vec![
                TimeBlock::new("6:00 AM", "6:40 AM", MORNING_MUSIC),
                TimeBlock::new("6:40 AM", "7:20 AM", "Traslado al Trabajo"),
                TimeBlock::new("8:25 AM", "9:25 AM", ENGLISH_VIDEOS),
                TimeBlock::new("9:25 AM", "11:00 AM", GENERIC_STUDY_LABEL).focus(),
                TimeBlock::new("11:00 AM", "12:00 PM", ENGLISH_VIDEOS),
                TimeBlock::new("12:00 PM", "1:00 PM", LUNCH),
                TimeBlock::new("1:00 PM", "3:00 PM", WORK),
                TimeBlock::new("4:40 PM", "5:10 PM", ANKI).focus(),
                TimeBlock::new("6:10 PM", "7:10 PM", PYTHON_PROJECT).focus(),
            ],
        )
        .day(
            2,
            with_evening(
                weekday_core(),
                TimeBlock::new("6:10 PM", "7:40 PM", "Programar Servidor Haxball"),
            ),
        )
        .day(
            3,
            with_evening(
                weekday_core(),
                TimeBlock::new("6:10 PM", "7:10 PM", PYTHON_PROJECT).focus(),
            ),
        )
        .day(4, weekday_core())
        .day(
            5,
            with_evening(
                weekday_core(),
                TimeBlock::new("8:00 PM", "10:00 PM", "Liga de Haxball").focus(),
            ),
        )
        .day(
            6,
            vec![
                TimeBlock::new("2:00 PM", "2:30 PM", LATE_LUNCH),
                TimeBlock::new("2:30 PM", "4:30 PM", AI_COURSE).focus(),
                TimeBlock::new("4:30 PM", "5:30 PM", PYTHON_PROJECT).focus(),
                TimeBlock::new("5:30 PM", "7:30 PM", ENGLISH_VIDEOS),
                TimeBlock::new("9:50 PM", "11:50 PM", "Canal de YouTube").focus(),
            ],
        )
        .build()
}

#[cfg(test)]
mod tests {
    use crate::schedule::agenda::GENERIC_STUDY_LABEL;

    use super::{curriculum, topic_details, weekly_template, FALLBACK_TOPIC, PROGRAM_START};

    #[test]
    fn every_weekday_is_configured() {
        let template = weekly_template();
        assert_eq!(template.weekdays().collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
        let counts = (0..7)
            .map(|day| template.blocks_for(day).len())
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![5, 9, 6, 6, 5, 6, 5]);
    }

    #[test]
    fn study_block_only_on_working_days() {
        let template = weekly_template();
        for day in 0..7 {
            let has_study = template
                .blocks_for(day)
                .iter()
                .any(|b| b.activity_label.as_ref() == GENERIC_STUDY_LABEL);
            assert_eq!(has_study, (1..=5).contains(&day), "weekday {day}");
        }
    }

    #[test]
    fn curriculum_ends_with_fallback() {
        let curriculum = curriculum();
        assert_eq!(curriculum.topics().len(), 12);
        assert_eq!(curriculum.topics()[11].as_ref(), FALLBACK_TOPIC);
        assert_eq!(curriculum.fallback().as_ref(), FALLBACK_TOPIC);
        assert_eq!(
            curriculum.topic_for_date(PROGRAM_START).as_ref(),
            "Fundamentos: Variables, Tipos de Datos"
        );
    }

    #[test]
    fn every_topic_has_a_description() {
        let curriculum = curriculum();
        let details = topic_details();
        for topic in curriculum.topics() {
            assert_ne!(
                details.describe(GENERIC_STUDY_LABEL, Some(&**topic)).as_ref(),
                crate::schedule::details::NO_DETAILS,
                "{topic}"
            );
        }
    }
}
