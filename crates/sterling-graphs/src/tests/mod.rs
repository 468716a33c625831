mod config;
mod graph;

pub(crate) const LIST: &str = include_str!("../../../../fixtures/instances/linked_list.xml");
pub(crate) const TRACE: &str =
    include_str!("../../../../fixtures/instances/tic_tac_toe_trace.xml");

pub(crate) fn instances(xml: &str) -> Vec<sterling_core::Instance> {
    sterling_core::parse_document(xml, sterling_core::ParseOptions::default())
        .unwrap()
        .into_instances()
}
