//! Stateless read-only queries over the hypervisor.
//!
//! Every query acquires references, reads what it needs, and disposes of
//! the references before returning: nothing reference-shaped outlives a
//! call. Listings are materialized eagerly because the read-then-release
//! discipline has to finish with one element before touching the next.

use serde::Serialize;
use vmrc_core::{CollectorRef, HostRef, MachineRef, MetricRef, RootRef, Value};

use crate::session::SessionManager;
use crate::{methods, ClientError, RpcGateway};

/// One registered machine, as seen by the listing.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct MachineSummary {
    /// Reference token the machine was enumerated under. The token has
    /// already been released; it is kept for display only.
    pub reference: String,
    /// Display name of the machine.
    pub name: String,
}

/// Host facts: processor count and the advertised performance metrics.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct HostInfo {
    /// Number of host processors.
    pub processor_count: u32,
    /// Names of the metrics the performance collector advertises for the
    /// host under the wildcard selector.
    pub metrics: Vec<String>,
}

/// Read-only inspection queries against the management service.
pub struct InspectionService<'g, G: RpcGateway> {
    gateway: &'g G,
    sessions: SessionManager<'g, G>,
}

impl<'g, G: RpcGateway> InspectionService<'g, G> {
    /// Create an inspection service over the given gateway.
    #[must_use]
    pub fn new(gateway: &'g G) -> Self {
        Self { gateway, sessions: SessionManager::new(gateway) }
    }

    /// Enumerate all registered machines with their display names.
    ///
    /// Each machine reference is released immediately after its name is
    /// read. A server with zero registered machines yields an empty
    /// vector, not an error.
    ///
    /// # Errors
    /// Propagates gateway faults and malformed results; the reference of
    /// the element being read is released before the error surfaces.
    pub async fn list_machines(
        &self,
        root: &RootRef,
    ) -> Result<Vec<MachineSummary>, ClientError> {
        let machines = self
            .gateway
            .call(methods::GET_MACHINES, &[Value::from(root.as_str())])
            .await?
            .into_array()
            .map_err(|e| ClientError::protocol(methods::GET_MACHINES, e))?;

        let mut summaries = Vec::with_capacity(machines.len());
        for value in machines {
            let machine = MachineRef::new(
                value
                    .into_string()
                    .map_err(|e| ClientError::protocol(methods::GET_MACHINES, e))?,
            );
            let name_call = self
                .gateway
                .call(methods::MACHINE_GET_NAME, &[Value::from(machine.as_str())])
                .await;
            let reference = machine.as_str().to_owned();
            self.sessions.release(machine).await;

            let name = name_call?
                .into_string()
                .map_err(|e| ClientError::protocol(methods::MACHINE_GET_NAME, e))?;
            summaries.push(MachineSummary { reference, name });
        }
        tracing::debug!(count = summaries.len(), "machine listing complete");
        Ok(summaries)
    }

    /// Read the host processor count and the wildcard metric names.
    ///
    /// # Errors
    /// Propagates gateway faults and malformed results. The host and
    /// collector references are released on every path out.
    pub async fn host_info(&self, root: &RootRef) -> Result<HostInfo, ClientError> {
        let host = HostRef::new(
            self.gateway
                .call(methods::GET_HOST, &[Value::from(root.as_str())])
                .await?
                .into_string()
                .map_err(|e| ClientError::protocol(methods::GET_HOST, e))?,
        );

        let result = self.host_info_inner(root, &host).await;
        self.sessions.release(host).await;
        result
    }

    /// Read the server's version string.
    ///
    /// # Errors
    /// Propagates gateway faults and malformed results.
    pub async fn server_version(&self, root: &RootRef) -> Result<String, ClientError> {
        self.gateway
            .call(methods::GET_VERSION, &[Value::from(root.as_str())])
            .await?
            .into_string()
            .map_err(|e| ClientError::protocol(methods::GET_VERSION, e))
    }

    async fn host_info_inner(
        &self,
        root: &RootRef,
        host: &HostRef,
    ) -> Result<HostInfo, ClientError> {
        let processor_count = self
            .gateway
            .call(methods::HOST_GET_PROCESSOR_COUNT, &[Value::from(host.as_str())])
            .await?
            .to_u32()
            .map_err(|e| ClientError::protocol(methods::HOST_GET_PROCESSOR_COUNT, e))?;

        let collector = CollectorRef::new(
            self.gateway
                .call(methods::GET_PERFORMANCE_COLLECTOR, &[Value::from(root.as_str())])
                .await?
                .into_string()
                .map_err(|e| ClientError::protocol(methods::GET_PERFORMANCE_COLLECTOR, e))?,
        );

        let metrics = self.metric_names(&collector, host).await;
        self.sessions.release(collector).await;

        Ok(HostInfo { processor_count, metrics: metrics? })
    }

    /// Query the collector for the host's metrics under the wildcard
    /// selector, reading and releasing each metric reference in turn.
    async fn metric_names(
        &self,
        collector: &CollectorRef,
        host: &HostRef,
    ) -> Result<Vec<String>, ClientError> {
        let metric_refs = self
            .gateway
            .call(
                methods::COLLECTOR_GET_METRICS,
                &[
                    Value::from(collector.as_str()),
                    Value::Array(vec![Value::from("*")]),
                    Value::Array(vec![Value::from(host.as_str())]),
                ],
            )
            .await?
            .into_array()
            .map_err(|e| ClientError::protocol(methods::COLLECTOR_GET_METRICS, e))?;

        let mut names = Vec::with_capacity(metric_refs.len());
        for value in metric_refs {
            let metric = MetricRef::new(
                value
                    .into_string()
                    .map_err(|e| ClientError::protocol(methods::COLLECTOR_GET_METRICS, e))?,
            );
            let name_call = self
                .gateway
                .call(methods::METRIC_GET_NAME, &[Value::from(metric.as_str())])
                .await;
            self.sessions.release(metric).await;

            names.push(
                name_call?
                    .into_string()
                    .map_err(|e| ClientError::protocol(methods::METRIC_GET_NAME, e))?,
            );
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use vmrc_core::{RemoteFault, RootRef, Value};

    use super::*;
    use crate::testkit::ScriptedGateway;

    #[tokio::test]
    async fn zero_machines_is_an_empty_listing() {
        let gateway = ScriptedGateway::new(vec![Ok(Value::Array(Vec::new()))]);
        let service = InspectionService::new(&gateway);
        let machines = service
            .list_machines(&RootRef::new("root-1"))
            .await
            .expect("empty registry must not error");
        assert!(machines.is_empty());
        assert_eq!(gateway.count(methods::RELEASE), 0, "nothing acquired, nothing released");
    }

    #[tokio::test]
    async fn listing_reads_then_releases_each_machine() {
        let gateway = ScriptedGateway::new(vec![
            Ok(Value::Array(vec![Value::from("machine-1"), Value::from("machine-2")])),
            Ok(Value::from("alpha")), // getName machine-1
            Ok(Value::Void),          // release machine-1
            Ok(Value::from("beta")),  // getName machine-2
            Ok(Value::Void),          // release machine-2
        ]);
        let service = InspectionService::new(&gateway);
        let machines = service
            .list_machines(&RootRef::new("root-1"))
            .await
            .expect("listing must succeed");

        assert_eq!(machines.len(), 2);
        assert_eq!(machines[0].name, "alpha");
        assert_eq!(machines[0].reference, "machine-1");
        assert_eq!(machines[1].name, "beta");
        assert_eq!(gateway.count(methods::RELEASE), 2);

        let order = gateway.methods_called();
        let first_release = order.iter().position(|m| m == methods::RELEASE);
        let second_name = order.iter().rposition(|m| m == methods::MACHINE_GET_NAME);
        assert!(
            first_release < second_name,
            "each reference must be released before the next element is read: {order:?}"
        );
    }

    #[tokio::test]
    async fn listing_releases_current_machine_when_name_read_faults() {
        let gateway = ScriptedGateway::new(vec![
            Ok(Value::Array(vec![Value::from("machine-1")])),
            Err(RemoteFault::new(-6, "inaccessible")),
            Ok(Value::Void), // release machine-1
        ]);
        let service = InspectionService::new(&gateway);
        let err = service
            .list_machines(&RootRef::new("root-1"))
            .await
            .expect_err("faulting name read must surface");
        assert!(matches!(err, ClientError::Fault(_)));
        assert_eq!(
            gateway.count(methods::RELEASE),
            1,
            "the reference being read must still be released"
        );
    }

    #[tokio::test]
    async fn host_info_balances_every_reference() {
        let gateway = ScriptedGateway::new(vec![
            Ok(Value::from("host-1")),     // getHost
            Ok(Value::Int(8)),             // processor count
            Ok(Value::from("collector-1")),// getPerformanceCollector
            Ok(Value::Array(vec![Value::from("metric-1"), Value::from("metric-2")])),
            Ok(Value::from("CPU/Load")),   // metric-1 name
            Ok(Value::Void),               // release metric-1
            Ok(Value::from("RAM/Usage")),  // metric-2 name
            Ok(Value::Void),               // release metric-2
            Ok(Value::Void),               // release collector
            Ok(Value::Void),               // release host
        ]);
        let service = InspectionService::new(&gateway);
        let info = service
            .host_info(&RootRef::new("root-1"))
            .await
            .expect("host info must succeed");

        assert_eq!(info.processor_count, 8);
        assert_eq!(info.metrics, vec!["CPU/Load".to_owned(), "RAM/Usage".to_owned()]);
        assert_eq!(
            gateway.count(methods::RELEASE),
            4,
            "metrics, collector, and host must all be released"
        );
    }

    #[tokio::test]
    async fn host_info_releases_host_when_processor_count_faults() {
        let gateway = ScriptedGateway::new(vec![
            Ok(Value::from("host-1")),
            Err(RemoteFault::new(-6, "host busy")),
            Ok(Value::Void), // release host
        ]);
        let service = InspectionService::new(&gateway);
        let err = service
            .host_info(&RootRef::new("root-1"))
            .await
            .expect_err("fault must surface");
        assert!(matches!(err, ClientError::Fault(_)));
        assert_eq!(gateway.count(methods::RELEASE), 1, "the host reference must not leak");
    }

    #[tokio::test]
    async fn server_version_is_a_plain_string() {
        let gateway = ScriptedGateway::new(vec![Ok(Value::from("7.0.4"))]);
        let service = InspectionService::new(&gateway);
        let version = service
            .server_version(&RootRef::new("root-1"))
            .await
            .expect("version must succeed");
        assert_eq!(version, "7.0.4");
    }
}
