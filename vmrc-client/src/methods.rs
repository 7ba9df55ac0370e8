//! Wire method names of the management web service.
//!
//! Kept in one place so the protocol components, the concrete gateway, and
//! the test fakes agree on the vocabulary.

// Websession manager
pub const LOGON: &str = "IWebsessionManager_logon";
pub const LOGOFF: &str = "IWebsessionManager_logoff";
pub const GET_SESSION_OBJECT: &str = "IWebsessionManager_getSessionObject";

// Reference disposal
pub const RELEASE: &str = "IManagedObjectRef_release";

// Hypervisor root object
pub const GET_VERSION: &str = "IVirtualBox_getVersion";
pub const GET_MACHINES: &str = "IVirtualBox_getMachines2";
pub const GET_MACHINE: &str = "IVirtualBox_getMachine";
pub const FIND_MACHINE: &str = "IVirtualBox_findMachine";
pub const GET_HOST: &str = "IVirtualBox_getHost";
pub const GET_PERFORMANCE_COLLECTOR: &str = "IVirtualBox_getPerformanceCollector";
pub const OPEN_REMOTE_SESSION: &str = "IVirtualBox_openRemoteSession";

// Machine accessors
pub const MACHINE_GET_NAME: &str = "IMachine_getName";
pub const MACHINE_GET_ID: &str = "IMachine_getId";

// Host and performance collector
pub const HOST_GET_PROCESSOR_COUNT: &str = "IHost_getProcessorCount";
pub const COLLECTOR_GET_METRICS: &str = "IPerformanceCollector_getMetrics";
pub const METRIC_GET_NAME: &str = "IPerformanceMetric_getMetricName";

// Progress objects
pub const PROGRESS_WAIT: &str = "IProgress_waitForCompletion";
pub const PROGRESS_GET_COMPLETED: &str = "IProgress_getCompleted";
pub const PROGRESS_GET_RESULT_CODE: &str = "IProgress_getResultCode";

// Sessions
pub const SESSION_CLOSE: &str = "ISession_close";
