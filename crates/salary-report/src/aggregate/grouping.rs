use crate::config::GroupOrder;
use std::collections::HashMap;

/// The fields of a cleaned record that aggregation reads.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRow {
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub salary: f64,
}

/// Group rows by a key, keeping table order inside each group.
///
/// Rows whose key is `None` are dropped. Groups come back sorted by key or
/// in order of first appearance, depending on `order`.
pub fn group_rows<'a, F>(
    rows: &'a [EmployeeRow],
    key: F,
    order: GroupOrder,
) -> Vec<(String, Vec<&'a EmployeeRow>)>
where
    F: Fn(&'a EmployeeRow) -> Option<&'a str>,
{
    let mut groups: Vec<(String, Vec<&'a EmployeeRow>)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for row in rows {
        let Some(k) = key(row) else {
            continue;
        };
        match index.get(k) {
            Some(&i) => groups[i].1.push(row),
            None => {
                index.insert(k, groups.len());
                groups.push((k.to_string(), vec![row]));
            }
        }
    }

    if order == GroupOrder::Sorted {
        groups.sort_by(|a, b| a.0.cmp(&b.0));
    }
    groups
}
