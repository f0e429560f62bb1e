//! Standard body-class computation.
//!
//! Recomputed once, when the page transitions into header printing, from
//! whatever the context holds at that moment.

use crate::services::{DeviceClass, TextDirection};

pub(crate) struct StandardClassInputs<'a> {
    pub direction: TextDirection,
    pub device: DeviceClass,
    pub layout: &'a str,
    pub page_type: Option<&'a str>,
    pub scope_id: Option<i64>,
    pub course_id: Option<i64>,
    pub module_id: Option<i64>,
    pub category_id: Option<i64>,
    pub editing: bool,
    pub lock_all_blocks: bool,
}

pub(crate) fn standard_classes(inputs: &StandardClassInputs<'_>) -> Vec<String> {
    let mut classes = vec![
        inputs.direction.body_class().to_string(),
        inputs.device.body_class().to_string(),
        format!("pagelayout-{}", inputs.layout),
    ];

    if let Some(page_type) = inputs.page_type {
        classes.push(format!("pagetype-{page_type}"));
        if let Some(first) = page_type.split('-').next() {
            classes.push(format!("path-{first}"));
        }
    }
    if let Some(id) = inputs.scope_id {
        classes.push(format!("scope-{id}"));
    }
    if let Some(id) = inputs.course_id {
        classes.push(format!("course-{id}"));
    }
    if let Some(id) = inputs.module_id {
        classes.push(format!("cmid-{id}"));
    }
    if let Some(id) = inputs.category_id {
        classes.push(format!("category-{id}"));
    }

    classes.push(if inputs.editing { "editing" } else { "notediting" }.to_string());
    if inputs.lock_all_blocks {
        classes.push("lockallblocks".to_string());
    }

    classes
}
