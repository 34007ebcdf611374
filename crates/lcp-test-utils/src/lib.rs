//! Testing utilities for the LCP workspace
//!
//! Shared lifecycle fixtures and document assertions.

#![allow(missing_docs)]

use lcp_document::{ExecutionEntry, LifecycleDocument};

pub const CUSTOM_EXECUTOR: &str = "org.wso2.carbon.apimgt.micro.gateway.common.api.APIExecutionHandler";
pub const DEFAULT_EXECUTOR: &str = "org.wso2.carbon.apimgt.impl.executors.APIExecutor";

/// Registry-shaped lifecycle: `state > datamodel > data > execution`, SCXML default namespace.
pub const API_LIFECYCLE_XML: &str = r#"<aspect name="APILifeCycle" class="org.wso2.carbon.governance.registry.extensions.aspects.DefaultLifeCycle">
  <configuration type="literal">
    <lifecycle>
      <scxml xmlns="http://www.w3.org/2005/07/scxml" version="1.0" initialstate="Created">
        <state id="Created">
          <datamodel>
            <data name="transitionExecution">
              <execution forEvent="Deploy as a Prototype" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
              <execution forEvent="Publish" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
            </data>
          </datamodel>
          <transition event="Publish" target="Published"/>
          <transition event="Deploy as a Prototype" target="Prototyped"/>
        </state>
        <state id="Prototyped">
          <datamodel>
            <data name="transitionExecution">
              <execution forEvent="Publish" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
              <execution forEvent="Demote to Created" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
            </data>
          </datamodel>
          <transition event="Publish" target="Published"/>
          <transition event="Demote to Created" target="Created"/>
        </state>
        <state id="Published">
          <datamodel>
            <data name="transitionExecution">
              <execution forEvent="Block" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
              <execution forEvent="Deprecate" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
              <execution forEvent="Re-Publish" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
            </data>
          </datamodel>
          <transition event="Block" target="Blocked"/>
          <transition event="Deprecate" target="Deprecated"/>
          <transition event="Re-Publish" target="Published"/>
        </state>
        <state id="Blocked">
          <datamodel>
            <data name="transitionExecution">
              <execution forEvent="Re-Publish" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
            </data>
          </datamodel>
          <transition event="Re-Publish" target="Published"/>
        </state>
      </scxml>
    </lifecycle>
  </configuration>
</aspect>"#;

/// Flat layout: `state > data > execution`, no namespace.
pub const FLAT_LIFECYCLE_XML: &str = r#"<lifecycle>
  <state id="Created">
    <data>
      <execution forEvent="Publish" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
    </data>
  </state>
  <state id="Published">
    <data>
      <execution forEvent="Retire" class="org.wso2.carbon.apimgt.impl.executors.APIExecutor"/>
    </data>
  </state>
</lifecycle>"#;

/// A `Published` state whose `data` section is empty.
pub const EMPTY_PUBLISHED_XML: &str = r#"<lifecycle><state id="Published"><data/></state></lifecycle>"#;

pub const MALFORMED_XML: &str = "<not-xml";

/// `Published/data` holding `count` duplicate `Publish` entries targeting `class`.
#[must_use]
pub fn published_with_duplicates(count: usize, class: &str) -> String {
    let executions: String = (0..count)
        .map(|_| format!(r#"<execution forEvent="Publish" class="{class}"/>"#))
        .collect();
    format!(
        r#"<lifecycle><state id="Published"><data>{executions}<execution forEvent="Retire" class="{DEFAULT_EXECUTOR}"/></data></state></lifecycle>"#
    )
}

pub fn parse(xml: &str) -> LifecycleDocument {
    LifecycleDocument::parse(xml).unwrap()
}

/// Re-serialize through the document model so outputs can be compared textually.
pub fn normalize(xml: &str) -> String {
    parse(xml).to_xml_string().unwrap()
}

pub fn all_entries(xml: &str) -> Vec<ExecutionEntry> {
    parse(xml).executions().into_iter().map(|l| l.entry).collect()
}

pub fn count_class(xml: &str, class: &str) -> usize {
    all_entries(xml).iter().filter(|e| e.class == class).count()
}

pub fn published_entries(xml: &str) -> Vec<ExecutionEntry> {
    parse(xml).data_executions("Published")
}
