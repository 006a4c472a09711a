//! The OpenEBS-backed NFS provisioner manifest

use super::error::ManifestError;
use super::params::ManifestParams;
use super::template::Template;

/// Kinds in the order they appear in [`OPENEBS_NFS_TEMPLATE`]
pub const MANIFEST_KINDS: [&str; 11] = [
    "PodSecurityPolicy",
    "ClusterRole",
    "ClusterRoleBinding",
    "Role",
    "RoleBinding",
    "ServiceAccount",
    "Service",
    "Deployment",
    "PersistentVolumeClaim",
    "StorageClass",
    "PersistentVolumeClaim",
];

pub const OPENEBS_NFS_TEMPLATE: &str = r#"apiVersion: policy/v1beta1
kind: PodSecurityPolicy
metadata:
  name: {{ .ProvisionerStatefulName }}
spec:
  fsGroup:
    rule: RunAsAny
  allowedCapabilities:
  - DAC_READ_SEARCH
  - SYS_RESOURCE
  runAsUser:
    rule: RunAsAny
  seLinux:
    rule: RunAsAny
  supplementalGroups:
    rule: RunAsAny
  volumes:
  - configMap
  - downwardAPI
  - emptyDir
  - persistentVolumeClaim
  - secret
  - hostPath
---
kind: ClusterRole
apiVersion: rbac.authorization.k8s.io/v1
metadata:
  name: {{ .NFSClusterRoleName }}
rules:
  - apiGroups: [""]
    resources: ["persistentvolumes"]
    verbs: ["get", "list", "watch", "create", "delete"]
  - apiGroups: [""]
    resources: ["persistentvolumeclaims"]
    verbs: ["get", "list", "watch", "update"]
  - apiGroups: ["storage.k8s.io"]
    resources: ["storageclasses"]
    verbs: ["get", "list", "watch"]
  - apiGroups: [""]
    resources: ["events"]
    verbs: ["create", "update", "patch"]
  - apiGroups: [""]
    resources: ["services", "endpoints"]
    verbs: ["get"]
  - apiGroups: ["policy"]
    resources: ["podsecuritypolicies"]
    resourceNames: ["{{ .ProvisionerStatefulName }}"]
    verbs: ["use"]
---
kind: ClusterRoleBinding
apiVersion: rbac.authorization.k8s.io/v1
metadata:
  name: {{ .NFSClusterRoleBindingName }}
subjects:
  - kind: ServiceAccount
    name: {{ .ProvisionerStatefulName }}
    # replace with namespace where provisioner is deployed
    namespace: default
roleRef:
  kind: ClusterRole
  name: {{ .NFSClusterRoleName }}
  apiGroup: rbac.authorization.k8s.io
---
kind: Role
apiVersion: rbac.authorization.k8s.io/v1
metadata:
  name: {{ .NFSRoleName }}
rules:
  - apiGroups: [""]
    resources: ["endpoints"]
    verbs: ["get", "list", "watch", "create", "update", "patch"]
---
kind: RoleBinding
apiVersion: rbac.authorization.k8s.io/v1
metadata:
  name: {{ .NFSRoleName }}
subjects:
  - kind: ServiceAccount
    name: {{ .ProvisionerStatefulName }}
    # replace with namespace where provisioner is deployed
    namespace: default
roleRef:
  kind: Role
  name: {{ .NFSRoleName }}
  apiGroup: rbac.authorization.k8s.io
---
apiVersion: v1
kind: ServiceAccount
metadata:
  name: {{ .ProvisionerStatefulName }}
---
kind: Service
apiVersion: v1
metadata:
  name: {{ .ProvisionerStatefulName }}
  labels:
    app: {{ .ProvisionerStatefulName }}
spec:
  ports:
    - name: nfs
      port: 2049
    - name: mountd
      port: 20048
    - name: rpcbind
      port: 111
    - name: rpcbind-udp
      port: 111
      protocol: UDP
  selector:
    app: {{ .ProvisionerStatefulName }}
---
kind: Deployment
apiVersion: apps/v1
metadata:
  name: {{ .ProvisionerStatefulName }}
spec:
  selector:
    matchLabels:
      app: {{ .ProvisionerStatefulName }}
  replicas: 1
  strategy:
    type: Recreate
  template:
    metadata:
      labels:
        app: {{ .ProvisionerStatefulName }}
    spec:
      serviceAccountName: {{ .ProvisionerStatefulName }}
      terminationGracePeriodSeconds: 10
      containers:
        - name: {{ .ProvisionerStatefulName }}
          image: quay.io/kubernetes_incubator/nfs-provisioner:latest
          ports:
            - name: nfs
              containerPort: 2049
            - name: mountd
              containerPort: 20048
            - name: rpcbind
              containerPort: 111
            - name: rpcbind-udp
              containerPort: 111
              protocol: UDP
          securityContext:
            capabilities:
              add:
                - DAC_READ_SEARCH
                - SYS_RESOURCE
          args:
            - "-provisioner={{ .ProvisionerName }}"
          env:
            - name: POD_IP
              valueFrom:
                fieldRef:
                  fieldPath: status.podIP
            - name: SERVICE_NAME
              value: {{ .ProvisionerStatefulName }}
            - name: POD_NAMESPACE
              valueFrom:
                fieldRef:
                  fieldPath: metadata.namespace
          imagePullPolicy: "IfNotPresent"
          volumeMounts:
            - name: export-volume
              mountPath: /export
      volumes:
        - name: export-volume
          persistentVolumeClaim:
            claimName: {{ .OpenebsPVCName }}
---
kind: PersistentVolumeClaim
apiVersion: v1
metadata:
  name: {{ .OpenebsPVCName }}
spec:
  storageClassName: {{ .OpenebsStorageClass }}
  accessModes:
    - ReadWriteOnce
  resources:
    requests:
      storage: "{{ .OpenebsStorageSize }}"
---
kind: StorageClass
apiVersion: storage.k8s.io/v1
metadata:
  name: {{ .NFSStorageClass }}
provisioner: {{ .ProvisionerName }}
parameters:
  mountOptions: "vers=4.1"
---
kind: PersistentVolumeClaim
apiVersion: v1
metadata:
  name: {{ .NFSPVCName }}
  annotations:
    volume.beta.kubernetes.io/storage-class: "{{ .NFSStorageClass }}"
spec:
  accessModes:
    - {{ .NFSAccessMode }}
  resources:
    requests:
      storage: "{{ .NFSStorageSize }}"
"#;

/// File name the manifest for `app_name` is written to
pub fn output_file_name(app_name: &str) -> String {
    format!("{}-nfs.yaml", app_name)
}

/// Render the full NFS manifest for `params`
pub fn render_manifest(params: &ManifestParams) -> Result<String, ManifestError> {
    let template = Template::for_manifest(OPENEBS_NFS_TEMPLATE)?;
    template.render(params)
}
